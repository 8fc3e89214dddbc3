//! Validation of the contract definitions embedded in a packet.

use dpp_core::{StPacket, ValidationResult, Value};

use crate::traits::Validator;

/// Runs the structural contract validator over every embedded contract.
///
/// A packet without contracts is valid here; whether that is acceptable is
/// decided by the caller.
pub struct PacketContractValidator<V> {
    validate_contract: V,
}

impl<V: Validator<Value>> PacketContractValidator<V> {
    pub fn new(validate_contract: V) -> Self {
        Self { validate_contract }
    }
}

impl<V: Validator<Value>> Validator<StPacket> for PacketContractValidator<V> {
    fn validate(&self, packet: &StPacket, _context: &()) -> ValidationResult {
        let mut result = ValidationResult::new();

        for raw_contract in packet.contracts() {
            result.merge(self.validate_contract.validate(raw_contract, &()));
        }

        if !result.is_valid() {
            tracing::debug!(
                "packet for contract {} carries {} contract errors",
                packet.contract_id(),
                result.errors().len()
            );
        }

        result
    }
}
