//! # DPP Core
//!
//! Pure primitives for validating state transition packets: documents,
//! contracts, packets, and the consensus error taxonomy.
//!
//! This crate contains no I/O, no storage, no networking. Ledger lookups and
//! orchestration live in `dpp-verify`.
//!
//! ## Key Types
//!
//! - [`Value`] - Tagged tree used for every raw record, with path access
//! - [`Document`] - A single data record with identity, action and revision
//! - [`Contract`] - A contract definition addressed by its content hash
//! - [`StPacket`] - The bundle of contracts and documents submitted for consensus
//! - [`ValidationResult`] - Ordered, mergeable collection of [`ConsensusError`]s
//!
//! ## Canonicalization
//!
//! Documents and packets are hashed over deterministic CBOR. See [`canonical`].

pub mod canonical;
pub mod contract;
pub mod crypto;
pub mod document;
pub mod error;
pub mod packet;
pub mod transaction;
pub mod types;
pub mod validation;
pub mod value;

pub use canonical::{decode_value, encode_value};
pub use contract::Contract;
pub use crypto::{merkle_root, Blake3Hash};
pub use document::{Action, Document, RawDocument, SerializeOptions};
pub use error::{ConsensusError, CoreError, DocumentError, PathError};
pub use packet::{
    calculate_items_hash, calculate_items_merkle_root, PacketSerializeOptions, StPacket,
};
pub use transaction::{FetchedTransaction, LedgerTransaction, TransitionPayload};
pub use types::encode_identifier;
pub use validation::ValidationResult;
pub use value::Value;
