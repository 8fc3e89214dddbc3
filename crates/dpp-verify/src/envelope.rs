//! Envelope checks for a single raw document.
//!
//! This is the baseline per-document structural validator. It checks the
//! `$` envelope against the contract, not the payload against the schema.

use dpp_core::document::{fields, Action};
use dpp_core::{ConsensusError, Contract, ValidationResult, Value};

use crate::traits::Validator;

/// Validates the envelope of a raw document against its contract.
///
/// Reports, in order:
/// - a non-map document,
/// - a missing `$action`,
/// - a `$type` the contract does not define,
/// - payload on a `DELETE` document.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeDocumentValidator;

impl Validator<Value, Contract> for EnvelopeDocumentValidator {
    fn validate(&self, raw_document: &Value, contract: &Contract) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Some(map) = raw_document.as_map() else {
            result.add_error(ConsensusError::structural("document must be a map"));
            return result;
        };

        let action = map.get(fields::ACTION);
        if action.is_none() {
            result.add_error(ConsensusError::MissingAction {
                raw_document: raw_document.clone(),
            });
        }

        let document_type = map.get(fields::TYPE).and_then(Value::as_str);
        if !document_type.is_some_and(|t| contract.has_document_type(t)) {
            result.add_error(ConsensusError::InvalidDocumentType {
                document_type: document_type.unwrap_or_default().to_string(),
                contract_id: contract.id().to_string(),
            });
        }

        let is_delete = action.and_then(Value::as_i64).and_then(Action::from_i64)
            == Some(Action::Delete);
        let has_payload = map.keys().any(|key| !fields::is_envelope(key));
        if is_delete && has_payload {
            result.add_error(ConsensusError::DataNotAllowedWithDelete {
                raw_document: raw_document.clone(),
            });
        }

        result
    }
}
