//! Seams for the collaborators the packet validators are built from.
//!
//! Structural validators, duplicate detection and ledger access are injected
//! as trait implementations, so tests substitute recording fakes and nodes
//! plug in their real schema validators and ledger clients.

use std::sync::Arc;

use async_trait::async_trait;
use dpp_core::{Contract, FetchedTransaction, ValidationResult, Value};

use crate::error::ProviderError;

/// A validator: raw input plus context in, collected violations out.
///
/// Implementations never fail on rule violations; they report them in the
/// returned [`ValidationResult`].
pub trait Validator<T: ?Sized, C: ?Sized = ()>: Send + Sync {
    fn validate(&self, raw: &T, context: &C) -> ValidationResult;
}

impl<T: ?Sized, C: ?Sized, V: Validator<T, C> + ?Sized> Validator<T, C> for Arc<V> {
    fn validate(&self, raw: &T, context: &C) -> ValidationResult {
        (**self).validate(raw, context)
    }
}

/// Finds documents that occur more than once in a packet.
pub trait DuplicateFinder: Send + Sync {
    /// Return every raw document involved in a duplication, in input order.
    fn find_duplicates(&self, raw_documents: &[Value]) -> Vec<Value>;
}

impl<F: DuplicateFinder + ?Sized> DuplicateFinder for Arc<F> {
    fn find_duplicates(&self, raw_documents: &[Value]) -> Vec<Value> {
        (**self).find_duplicates(raw_documents)
    }
}

/// Source of confirmed-chain facts.
///
/// Timeouts and retries are the implementation's concern; a lookup that
/// cannot be answered returns an error rather than `None`.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch a transaction by hash. `None` if the ledger does not know it.
    async fn fetch_transaction(
        &self,
        id: &str,
    ) -> Result<Option<FetchedTransaction>, ProviderError>;

    /// Fetch a stored contract by ID. `None` if no such contract exists.
    async fn fetch_contract(&self, id: &str) -> Result<Option<Contract>, ProviderError>;
}

#[async_trait]
impl<P: DataProvider + ?Sized> DataProvider for Arc<P> {
    async fn fetch_transaction(
        &self,
        id: &str,
    ) -> Result<Option<FetchedTransaction>, ProviderError> {
        (**self).fetch_transaction(id).await
    }

    async fn fetch_contract(&self, id: &str) -> Result<Option<Contract>, ProviderError> {
        (**self).fetch_contract(id).await
    }
}
