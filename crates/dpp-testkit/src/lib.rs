//! # DPP Testkit
//!
//! Testing utilities for state transition packet validation.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a contract, documents, a packet and its ledger context
//! - **Fakes**: recording validators and a scripted duplicate finder
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! Quickly set up a packet that verifies cleanly:
//!
//! ```rust
//! use dpp_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let transition = fixture.transition();
//! assert_eq!(transition.extra_payload.unwrap().hash_st_packet, fixture.packet.hash());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use dpp_testkit::generators::{document_from_params, DocumentParams};
//!
//! proptest! {
//!     #[test]
//!     fn document_hash_is_deterministic(params: DocumentParams) {
//!         let d1 = document_from_params(&params);
//!         let d2 = document_from_params(&params);
//!         prop_assert_eq!(d1.hash(), d2.hash());
//!     }
//! }
//! ```

pub mod fakes;
pub mod fixtures;
pub mod generators;

pub use fakes::{RecordingContractValidator, RecordingDocumentValidator, StaticDuplicateFinder};
pub use fixtures::{
    contract_fixture, documents_fixture, packet_fixture, registration_fixture, transition_for,
    TestFixture, REG_TX_ID,
};
pub use generators::{document_from_params, DocumentParams};
