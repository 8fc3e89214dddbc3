//! # DPP Verify
//!
//! Packet-level validation and ledger-aware verification of state
//! transition packets.
//!
//! ## Overview
//!
//! [`PacketVerifier`] is the entry point. Given a packet and the ledger
//! transaction that carries it, it checks:
//!
//! 1. the transaction is a state transition (terminal on failure),
//! 2. the packet hash matches the transaction payload,
//! 3. the submitting user is registered and sufficiently confirmed,
//! 4. any embedded contract, via [`PacketContractValidator`],
//! 5. any embedded documents, via [`PacketDocumentValidator`].
//!
//! Every rule violation lands in one [`ValidationResult`]. Faults such as an
//! unavailable [`DataProvider`] abort with a [`VerifyError`] instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dpp_verify::{
//!     EnvelopeDocumentValidator, FingerprintDuplicateFinder, MemoryDataProvider,
//!     PacketContractValidator, PacketDocumentValidator, PacketVerifier, VerifierConfig,
//! };
//! # use dpp_core::{LedgerTransaction, StPacket, ValidationResult, Value};
//! # struct AcceptContracts;
//! # impl dpp_verify::Validator<Value> for AcceptContracts {
//! #     fn validate(&self, _: &Value, _: &()) -> ValidationResult { ValidationResult::new() }
//! # }
//!
//! async fn example(packet: StPacket, transition: LedgerTransaction) {
//!     let verifier = PacketVerifier::new(
//!         MemoryDataProvider::new(),
//!         PacketContractValidator::new(AcceptContracts),
//!         PacketDocumentValidator::new(EnvelopeDocumentValidator, FingerprintDuplicateFinder),
//!         VerifierConfig::default(),
//!     );
//!
//!     let result = verifier.verify(&packet, &transition).await.unwrap();
//!     if !result.is_valid() {
//!         for error in result.errors() {
//!             eprintln!("{error}");
//!         }
//!     }
//! }
//! ```

pub mod contracts;
pub mod documents;
pub mod duplicates;
pub mod envelope;
pub mod error;
pub mod memory;
pub mod traits;
pub mod verifier;

pub use contracts::PacketContractValidator;
pub use documents::PacketDocumentValidator;
pub use duplicates::{find_duplicate_documents, FingerprintDuplicateFinder};
pub use envelope::EnvelopeDocumentValidator;
pub use error::{ProviderError, Result, VerifyError};
pub use memory::MemoryDataProvider;
pub use traits::{DataProvider, DuplicateFinder, Validator};
pub use verifier::{PacketVerifier, VerifierConfig};

pub use dpp_core::{ConsensusError, ValidationResult};
