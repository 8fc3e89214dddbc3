//! Error types for DPP Core.
//!
//! Two families live here:
//!
//! - Faults ([`CoreError`], [`DocumentError`], [`PathError`]) abort the call
//!   that raised them. They mean the input could not even be inspected, or a
//!   local precondition was violated.
//! - Consensus errors ([`ConsensusError`]) are expected rule violations. They
//!   are never raised; validators collect them in a
//!   [`ValidationResult`](crate::validation::ValidationResult).

use thiserror::Error;

use crate::document::Document;
use crate::transaction::{FetchedTransaction, LedgerTransaction};
use crate::value::Value;

/// Faults raised while decoding or interpreting raw records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("input is not in canonical encoding")]
    NonCanonical,

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("malformed contract: {0}")]
    MalformedContract(String),

    #[error("malformed packet: {0}")]
    MalformedPacket(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Precondition violations on [`Document`] mutation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("data is not allowed with action DELETE (document {})", .document.id())]
    DataNotAllowedWithDelete { document: Box<Document> },

    #[error("field {0:?} is a reserved envelope field")]
    ReservedField(String),

    #[error("revision must be positive")]
    InvalidRevision,

    #[error("invalid field path: {0}")]
    InvalidPath(#[from] PathError),
}

/// Errors from parsing or applying a field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("empty segment in path {0:?}")]
    EmptySegment(String),

    #[error("malformed index in path {0:?}")]
    MalformedIndex(String),

    #[error("segment {0:?} is not an array index")]
    NotAnIndex(String),

    #[error("index {index} is past the end of an array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Consensus rule violations.
///
/// Every variant holds a snapshot of the offending input, never a reference
/// to a live entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    #[error("data is not allowed with action DELETE")]
    DataNotAllowedWithDelete { raw_document: Value },

    #[error("$action is not present")]
    MissingAction { raw_document: Value },

    #[error("document type {document_type:?} is not defined in contract {contract_id}")]
    InvalidDocumentType {
        document_type: String,
        contract_id: String,
    },

    #[error("transaction {} has type {}, expected a state transition", .transaction.hash, .transaction.tx_type)]
    InvalidTransactionType { transaction: LedgerTransaction },

    #[error("packet hash {packet_hash} does not match {expected_hash} in transaction {transaction_hash}")]
    InvalidPacketHash {
        packet_hash: String,
        expected_hash: String,
        transaction_hash: String,
    },

    #[error("packet itemsHash {items_hash:?} does not match its items ({expected_hash:?})")]
    InvalidItemsHash {
        items_hash: Option<String>,
        expected_hash: Option<String>,
    },

    #[error("packet itemsMerkleRoot {items_merkle_root:?} does not match its items ({expected_root:?})")]
    InvalidItemsMerkleRoot {
        items_merkle_root: Option<String>,
        expected_root: Option<String>,
    },

    #[error("user {user_id} not found")]
    UserNotFound { user_id: String },

    #[error("user registration {} has {} confirmations, {required} required", .transaction.hash, .transaction.confirmations)]
    UnconfirmedUser {
        transaction: FetchedTransaction,
        required: u32,
    },

    #[error("contract {contract_id} does not match packet contract {packet_contract_id}")]
    ContractMismatch {
        contract_id: String,
        packet_contract_id: String,
    },

    #[error("contract {contract_id} is not present")]
    ContractNotPresent { contract_id: String },

    #[error("{} duplicated documents", .duplicates.len())]
    DuplicateDocuments { duplicates: Vec<Value> },

    #[error("{message}")]
    Structural { message: String },
}

impl ConsensusError {
    /// Wrap a message from an external structural validator.
    pub fn structural(message: impl Into<String>) -> Self {
        ConsensusError::Structural {
            message: message.into(),
        }
    }
}
