//! Error types for packet verification.
//!
//! These are faults: they abort a verification call. Rule violations are
//! reported through [`ValidationResult`](dpp_core::ValidationResult) instead.

use thiserror::Error;

/// Errors reported by a [`DataProvider`](crate::traits::DataProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backing ledger or contract store could not be reached.
    #[error("data provider unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with data it could not interpret.
    #[error("invalid data from provider: {0}")]
    InvalidData(String),
}

/// Errors that abort packet verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("data provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A transaction of the transition type carried no transition payload.
    #[error("transaction {0} has no state transition payload")]
    MissingTransitionPayload(String),
}

/// Result type for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;
