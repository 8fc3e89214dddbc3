//! In-memory implementation of the DataProvider trait.
//!
//! This is primarily for testing and for embedding a fixed ledger view. It
//! counts lookups so callers can assert which stages of verification ran.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use dpp_core::{Contract, FetchedTransaction};

use crate::error::ProviderError;
use crate::traits::DataProvider;

/// In-memory data provider. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryDataProvider {
    inner: RwLock<MemoryDataProviderInner>,
    transaction_lookups: AtomicUsize,
    contract_lookups: AtomicUsize,
    unavailable: AtomicBool,
}

#[derive(Default)]
struct MemoryDataProviderInner {
    /// Transactions indexed by hash.
    transactions: HashMap<String, FetchedTransaction>,

    /// Contracts indexed by ID.
    contracts: HashMap<String, Contract>,
}

impl MemoryDataProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction, replacing any previous one with the same hash.
    pub fn insert_transaction(&self, transaction: FetchedTransaction) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .transactions
            .insert(transaction.hash.clone(), transaction);
    }

    /// Record a contract under its ID.
    pub fn insert_contract(&self, contract: Contract) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.contracts.insert(contract.id().to_string(), contract);
    }

    /// Make every subsequent lookup fail with [`ProviderError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `fetch_transaction` calls so far.
    pub fn transaction_lookups(&self) -> usize {
        self.transaction_lookups.load(Ordering::SeqCst)
    }

    /// Number of `fetch_contract` calls so far.
    pub fn contract_lookups(&self) -> usize {
        self.contract_lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), ProviderError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("memory provider switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DataProvider for MemoryDataProvider {
    async fn fetch_transaction(
        &self,
        id: &str,
    ) -> Result<Option<FetchedTransaction>, ProviderError> {
        self.transaction_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.transactions.get(id).cloned())
    }

    async fn fetch_contract(&self, id: &str) -> Result<Option<Contract>, ProviderError> {
        self.contract_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.contracts.get(id).cloned())
    }
}
