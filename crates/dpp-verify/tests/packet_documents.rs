//! Packet document validation against recording collaborators.

use std::sync::Arc;

use dpp_core::{ConsensusError, StPacket, ValidationResult};
use dpp_testkit::{
    contract_fixture, documents_fixture, packet_fixture, RecordingDocumentValidator,
    StaticDuplicateFinder,
};
use dpp_verify::{PacketDocumentValidator, Validator};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn empty_packet_makes_no_document_calls() {
    init_tracing();
    let contract = contract_fixture();
    let documents = Arc::new(RecordingDocumentValidator::new());
    let validator = PacketDocumentValidator::new(documents.clone(), StaticDuplicateFinder::none());

    let result = validator.validate(&StPacket::new(contract.id()), &contract);

    assert!(result.is_valid());
    assert!(documents.calls().is_empty());
}

#[test]
fn valid_packet_calls_validator_per_document() {
    init_tracing();
    let contract = contract_fixture();
    let packet = packet_fixture();
    let documents = Arc::new(RecordingDocumentValidator::new());
    let finder = Arc::new(StaticDuplicateFinder::none());
    let validator = PacketDocumentValidator::new(documents.clone(), finder.clone());

    let result = validator.validate(&packet, &contract);

    assert!(result.is_valid());
    assert_eq!(documents.documents(), documents_fixture());
    assert!(documents.calls().iter().all(|(_, id)| id == contract.id()));
    assert_eq!(finder.calls(), vec![documents_fixture()]);
}

#[test]
fn duplicates_are_reported_once() {
    init_tracing();
    let contract = contract_fixture();
    let packet = packet_fixture();
    let raw_documents = documents_fixture();
    let documents = Arc::new(RecordingDocumentValidator::new());
    let finder = StaticDuplicateFinder::new(vec![raw_documents[0].clone()]);
    let validator = PacketDocumentValidator::new(documents.clone(), finder);

    let result = validator.validate(&packet, &contract);

    assert_eq!(
        result.errors(),
        &[ConsensusError::DuplicateDocuments {
            duplicates: vec![raw_documents[0].clone()]
        }]
    );
    assert_eq!(documents.documents(), raw_documents);
}

#[test]
fn contract_mismatch_still_validates_documents() {
    init_tracing();
    let contract = contract_fixture();
    let mut packet = StPacket::new("someOtherContract");
    packet.set_documents(documents_fixture());
    let documents = Arc::new(RecordingDocumentValidator::new());
    let validator = PacketDocumentValidator::new(documents.clone(), StaticDuplicateFinder::none());

    let result = validator.validate(&packet, &contract);

    assert_eq!(
        result.errors(),
        &[ConsensusError::ContractMismatch {
            contract_id: contract.id().to_string(),
            packet_contract_id: "someOtherContract".to_string(),
        }]
    );
    assert_eq!(documents.calls().len(), 3);
}

#[test]
fn errors_follow_call_order() {
    init_tracing();
    let contract = contract_fixture();
    let raw_documents = documents_fixture();
    let mut packet = StPacket::new("someOtherContract");
    packet.set_documents(raw_documents.clone());

    let first = ConsensusError::structural("name must be a string");
    let third = ConsensusError::MissingAction {
        raw_document: raw_documents[2].clone(),
    };
    let documents = RecordingDocumentValidator::with_results([
        ValidationResult::from(first.clone()),
        ValidationResult::new(),
        ValidationResult::from(third.clone()),
    ]);
    let finder = StaticDuplicateFinder::new(vec![raw_documents[1].clone()]);
    let validator = PacketDocumentValidator::new(documents, finder);

    let result = validator.validate(&packet, &contract);

    assert_eq!(
        result.errors(),
        &[
            ConsensusError::ContractMismatch {
                contract_id: contract.id().to_string(),
                packet_contract_id: "someOtherContract".to_string(),
            },
            first,
            third,
            ConsensusError::DuplicateDocuments {
                duplicates: vec![raw_documents[1].clone()]
            },
        ]
    );
}
