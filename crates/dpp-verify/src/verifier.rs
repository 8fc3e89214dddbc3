//! Ledger-aware verification of a state transition packet.

use dpp_core::transaction::tx_types;
use dpp_core::{
    calculate_items_hash, calculate_items_merkle_root, Blake3Hash, ConsensusError, Contract,
    FetchedTransaction, LedgerTransaction, StPacket, ValidationResult,
};

use crate::error::{Result, VerifyError};
use crate::traits::{DataProvider, Validator};

/// Configuration for the PacketVerifier.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Confirmations a registration transaction needs before its user may submit.
    pub required_confirmations: u32,
    /// Transaction type that carries state transitions.
    pub transition_type: u16,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            required_confirmations: 6,
            transition_type: tx_types::SUBTX_TRANSITION,
        }
    }
}

/// Verifies packets against the ledger transaction that carries them.
///
/// Stages:
/// 1. transaction type (terminal: a wrong-typed transaction has no payload to trust),
/// 2. packet hash against the transition payload,
/// 3. `itemsHash` and `itemsMerkleRoot` against the packet's items,
/// 4. submitter registration and confirmation depth,
/// 5. embedded contracts,
/// 6. documents, against the contract the packet references.
///
/// Stages 2 to 6 never short-circuit; their errors are merged in stage order.
/// The packet hash covers only the header, so stage 3 is what binds the
/// items to the transaction.
pub struct PacketVerifier<P, CV, DV> {
    provider: P,
    contracts: CV,
    documents: DV,
    config: VerifierConfig,
}

impl<P, CV, DV> PacketVerifier<P, CV, DV>
where
    P: DataProvider,
    CV: Validator<StPacket>,
    DV: Validator<StPacket, Contract>,
{
    pub fn new(provider: P, contracts: CV, documents: DV, config: VerifierConfig) -> Self {
        Self {
            provider,
            contracts,
            documents,
            config,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Verify a packet.
    ///
    /// Rule violations are collected in the returned result; an `Err` means
    /// verification could not be carried out at all.
    pub async fn verify(
        &self,
        packet: &StPacket,
        transition: &LedgerTransaction,
    ) -> Result<ValidationResult> {
        let mut result = ValidationResult::new();

        if !transition.is_special() || transition.tx_type != self.config.transition_type {
            tracing::debug!(
                "transaction {} has type {}, not a state transition",
                transition.hash,
                transition.tx_type
            );
            result.add_error(ConsensusError::InvalidTransactionType {
                transaction: transition.clone(),
            });
            return Ok(result);
        }

        let payload = transition
            .extra_payload
            .as_ref()
            .ok_or_else(|| VerifyError::MissingTransitionPayload(transition.hash.clone()))?;

        let packet_hash = packet.hash();
        if packet_hash != payload.hash_st_packet {
            tracing::debug!(
                "packet hash {} does not match transaction {}",
                packet_hash,
                transition.hash
            );
            result.add_error(ConsensusError::InvalidPacketHash {
                packet_hash,
                expected_hash: payload.hash_st_packet.clone(),
                transaction_hash: transition.hash.clone(),
            });
        }

        result.merge(check_item_digests(packet));

        let user_id = payload.reg_tx_id.as_str();

        // Independent lookups.
        let (registration, contract) = tokio::join!(
            self.provider.fetch_transaction(user_id),
            self.provider.fetch_contract(packet.contract_id()),
        );
        let registration = registration?;
        let contract = contract?;

        if let Some(error) = self.check_registration(user_id, registration) {
            result.add_error(error);
        }

        if packet.contract().is_some() {
            result.merge(self.contracts.validate(packet, &()));
        }

        if !packet.documents().is_empty() {
            match &contract {
                Some(contract) => result.merge(self.documents.validate(packet, contract)),
                None => {
                    tracing::warn!(
                        "packet carries documents for unknown contract {}",
                        packet.contract_id()
                    );
                    result.add_error(ConsensusError::ContractNotPresent {
                        contract_id: packet.contract_id().to_string(),
                    });
                }
            }
        }

        tracing::trace!(
            "verified packet {} with {} errors",
            packet.contract_id(),
            result.errors().len()
        );

        Ok(result)
    }

    fn check_registration(
        &self,
        user_id: &str,
        registration: Option<FetchedTransaction>,
    ) -> Option<ConsensusError> {
        match registration {
            None => {
                tracing::debug!("user {} not found", user_id);
                Some(ConsensusError::UserNotFound {
                    user_id: user_id.to_string(),
                })
            }
            Some(transaction) if transaction.confirmations < self.config.required_confirmations => {
                tracing::debug!(
                    "user {} has {} confirmations",
                    user_id,
                    transaction.confirmations
                );
                Some(ConsensusError::UnconfirmedUser {
                    transaction,
                    required: self.config.required_confirmations,
                })
            }
            Some(_) => None,
        }
    }
}

/// Compare the digests a packet declares with those of its items.
fn check_item_digests(packet: &StPacket) -> ValidationResult {
    let mut result = ValidationResult::new();

    let expected_hash = calculate_items_hash(packet);
    if !digest_matches(packet.items_hash(), expected_hash) {
        tracing::debug!(
            "packet itemsHash {:?} does not match items of contract {}",
            packet.items_hash(),
            packet.contract_id()
        );
        result.add_error(ConsensusError::InvalidItemsHash {
            items_hash: packet.items_hash().map(str::to_string),
            expected_hash: expected_hash.map(|hash| hash.to_string()),
        });
    }

    let expected_root = calculate_items_merkle_root(packet);
    if !digest_matches(packet.items_merkle_root(), expected_root) {
        tracing::debug!(
            "packet itemsMerkleRoot {:?} does not match items of contract {}",
            packet.items_merkle_root(),
            packet.contract_id()
        );
        result.add_error(ConsensusError::InvalidItemsMerkleRoot {
            items_merkle_root: packet.items_merkle_root().map(str::to_string),
            expected_root: expected_root.map(|root| root.to_string()),
        });
    }

    result
}

/// A declared digest must be present exactly when items are, and equal.
fn digest_matches(declared: Option<&str>, expected: Option<Blake3Hash>) -> bool {
    match (declared, expected) {
        (None, None) => true,
        (Some(declared), Some(expected)) => Blake3Hash::from_hex(declared).ok() == Some(expected),
        _ => false,
    }
}
