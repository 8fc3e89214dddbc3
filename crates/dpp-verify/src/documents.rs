//! Validation of the documents embedded in a packet.

use dpp_core::{ConsensusError, Contract, StPacket, ValidationResult, Value};

use crate::traits::{DuplicateFinder, Validator};

/// Validates a packet's documents against a resolved contract.
///
/// No stage short-circuits. Errors come out in call order:
/// 1. `ContractMismatch`, if the packet names a different contract,
/// 2. per-document errors, in document order,
/// 3. one `DuplicateDocuments` carrying every duplicate found.
///
/// Documents are still validated against a mismatched contract: each
/// failure is independently useful to whoever submitted the packet.
pub struct PacketDocumentValidator<V, F> {
    validate_document: V,
    find_duplicates: F,
}

impl<V, F> PacketDocumentValidator<V, F>
where
    V: Validator<Value, Contract>,
    F: DuplicateFinder,
{
    pub fn new(validate_document: V, find_duplicates: F) -> Self {
        Self {
            validate_document,
            find_duplicates,
        }
    }
}

impl<V, F> Validator<StPacket, Contract> for PacketDocumentValidator<V, F>
where
    V: Validator<Value, Contract>,
    F: DuplicateFinder,
{
    fn validate(&self, packet: &StPacket, contract: &Contract) -> ValidationResult {
        let mut result = ValidationResult::new();

        if packet.contract_id() != contract.id() {
            tracing::debug!(
                "packet contract {} does not match resolved contract {}",
                packet.contract_id(),
                contract.id()
            );
            result.add_error(ConsensusError::ContractMismatch {
                contract_id: contract.id().to_string(),
                packet_contract_id: packet.contract_id().to_string(),
            });
        }

        for raw_document in packet.documents() {
            result.merge(self.validate_document.validate(raw_document, contract));
        }

        let duplicates = self.find_duplicates.find_duplicates(packet.documents());
        if !duplicates.is_empty() {
            tracing::debug!("packet carries {} duplicated documents", duplicates.len());
            result.add_error(ConsensusError::DuplicateDocuments { duplicates });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::FingerprintDuplicateFinder;
    use crate::envelope::EnvelopeDocumentValidator;
    use dpp_core::document::fields;

    fn contract() -> Contract {
        Contract::from_raw(Value::map([(
            "documents",
            Value::map([("niceCat", Value::empty_map())]),
        )]))
        .unwrap()
    }

    fn cat(scope_id: &str) -> Value {
        Value::map([
            (fields::TYPE, Value::from("niceCat")),
            (fields::SCOPE, Value::from("scope")),
            (fields::SCOPE_ID, Value::from(scope_id)),
            (fields::ACTION, Value::Integer(0)),
        ])
    }

    fn validator() -> PacketDocumentValidator<EnvelopeDocumentValidator, FingerprintDuplicateFinder>
    {
        PacketDocumentValidator::new(EnvelopeDocumentValidator, FingerprintDuplicateFinder)
    }

    #[test]
    fn test_valid_documents() {
        let contract = contract();
        let mut packet = StPacket::new(contract.id());
        packet.set_documents(vec![cat("a"), cat("b")]);

        assert!(validator().validate(&packet, &contract).is_valid());
    }

    #[test]
    fn test_empty_packet_is_valid() {
        let contract = contract();
        let packet = StPacket::new(contract.id());

        assert!(validator().validate(&packet, &contract).is_valid());
    }

    #[test]
    fn test_error_order() {
        let contract = contract();
        let mut packet = StPacket::new("someone-else");
        let untyped = Value::map([(fields::ACTION, Value::Integer(0))]);
        packet.set_documents(vec![cat("a"), untyped, cat("a")]);

        let result = validator().validate(&packet, &contract);

        let errors = result.errors();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ConsensusError::ContractMismatch { .. }));
        assert!(matches!(errors[1], ConsensusError::InvalidDocumentType { .. }));
        assert_eq!(
            errors[2],
            ConsensusError::DuplicateDocuments {
                duplicates: vec![cat("a"), cat("a")]
            }
        );
    }
}
