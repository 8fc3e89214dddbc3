//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. The fixture contract defines two
//! document types and the fixture documents are all valid against it.

use std::sync::Arc;

use dpp_core::{
    Contract, FetchedTransaction, LedgerTransaction, StPacket, TransitionPayload, Value,
};
use dpp_verify::{MemoryDataProvider, PacketVerifier, Validator, VerifierConfig};
use serde_json::json;

/// Registration transaction of the fixture user.
pub const REG_TX_ID: &str = "5ab8e6ef1d1d4ebaa45e9f2cb0e5b8e2c6e1cdb7a05b5b8c8e5c2e1c7a7c3a11";

/// Hash of the fixture state transition transaction.
pub const TRANSITION_TX_ID: &str =
    "c3d4f0e5a7b6e1f2a8d9c0b1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1";

/// Convert a JSON literal into a raw record.
pub fn raw(json: serde_json::Value) -> Value {
    serde_json::from_value(json).expect("fixture JSON is a valid raw record")
}

/// A contract defining `niceCat` and `prettyCat` documents.
pub fn contract_fixture() -> Contract {
    let definition = raw(json!({
        "name": "lovelyCats",
        "documents": {
            "niceCat": {
                "properties": {
                    "name": { "type": "string" }
                },
                "required": ["name"],
                "additionalProperties": false
            },
            "prettyCat": {
                "properties": {
                    "lastName": { "type": "string" }
                },
                "required": ["lastName"],
                "additionalProperties": false
            }
        }
    }));

    Contract::from_raw(definition).expect("fixture contract is a map")
}

/// Three raw documents valid against [`contract_fixture`], none duplicated.
pub fn documents_fixture() -> Vec<Value> {
    let scope = "a832e4145650bfe8462e768e9c4a9a0d3a0bb7dcd9b3e50c61c73ac9d2e14068";

    vec![
        raw(json!({
            "$type": "niceCat",
            "$scope": scope,
            "$scopeId": "83a4xhaySWhfNAK3FKjKnxaxZTgh4vm7yp",
            "$action": 0,
            "$rev": 1,
            "name": "Cutie"
        })),
        raw(json!({
            "$type": "prettyCat",
            "$scope": scope,
            "$scopeId": "HgKXrLhm7sMjPrRGS1UsETmmQ7nZHbaKN7",
            "$action": 0,
            "$rev": 1,
            "lastName": "Shiny"
        })),
        raw(json!({
            "$type": "prettyCat",
            "$scope": scope,
            "$scopeId": "4mCdAL3H3akBPBEDkmN9d6Nn4yzQqRnxWF",
            "$action": 0,
            "$rev": 1,
            "lastName": "Sweety"
        })),
    ]
}

/// A packet carrying [`documents_fixture`] for [`contract_fixture`].
pub fn packet_fixture() -> StPacket {
    let mut packet = StPacket::new(contract_fixture().id());
    packet.set_documents(documents_fixture());
    packet.update_item_digests();
    packet
}

/// The fixture user's registration, as the ledger reports it.
pub fn registration_fixture(confirmations: u32) -> FetchedTransaction {
    FetchedTransaction {
        hash: REG_TX_ID.to_string(),
        confirmations,
    }
}

/// A state transition committing to `packet`, submitted by the fixture user.
pub fn transition_for(packet: &StPacket) -> LedgerTransaction {
    LedgerTransaction::transition(
        TRANSITION_TX_ID,
        TransitionPayload {
            reg_tx_id: REG_TX_ID.to_string(),
            hash_st_packet: packet.hash(),
        },
    )
}

/// A test fixture: a packet and a provider holding everything it needs.
pub struct TestFixture {
    pub provider: Arc<MemoryDataProvider>,
    pub contract: Contract,
    pub packet: StPacket,
}

impl TestFixture {
    /// Create a fixture whose user is registered with 6 confirmations and
    /// whose contract is stored.
    pub fn new() -> Self {
        let provider = Arc::new(MemoryDataProvider::new());
        let contract = contract_fixture();

        provider.insert_transaction(registration_fixture(6));
        provider.insert_contract(contract.clone());

        Self {
            provider,
            contract,
            packet: packet_fixture(),
        }
    }

    /// Create a fixture whose provider knows nothing.
    pub fn unregistered() -> Self {
        Self {
            provider: Arc::new(MemoryDataProvider::new()),
            contract: contract_fixture(),
            packet: packet_fixture(),
        }
    }

    /// A state transition committing to the fixture packet.
    pub fn transition(&self) -> LedgerTransaction {
        transition_for(&self.packet)
    }

    /// A verifier backed by the fixture provider.
    pub fn verifier<CV, DV>(
        &self,
        contracts: CV,
        documents: DV,
    ) -> PacketVerifier<Arc<MemoryDataProvider>, CV, DV>
    where
        CV: Validator<StPacket>,
        DV: Validator<StPacket, Contract>,
    {
        PacketVerifier::new(
            Arc::clone(&self.provider),
            contracts,
            documents,
            VerifierConfig::default(),
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpp_core::{calculate_items_hash, calculate_items_merkle_root, Document};
    use dpp_verify::{find_duplicate_documents, DataProvider};

    #[test]
    fn test_documents_fixture_is_well_formed() {
        let contract = contract_fixture();

        for raw_document in documents_fixture() {
            let document = Document::from_raw(&raw_document).unwrap();
            assert!(contract.has_document_type(document.document_type()));
        }
        assert!(find_duplicate_documents(&documents_fixture()).is_empty());
    }

    #[test]
    fn test_packet_references_contract() {
        let packet = packet_fixture();
        assert_eq!(packet.contract_id(), contract_fixture().id());
        assert_eq!(packet.documents().len(), 3);
    }

    #[test]
    fn test_packet_digests_match_items() {
        let packet = packet_fixture();

        let items_hash = calculate_items_hash(&packet).map(|hash| hash.to_hex());
        let root = calculate_items_merkle_root(&packet).map(|root| root.to_hex());
        assert_eq!(packet.items_hash(), items_hash.as_deref());
        assert_eq!(packet.items_merkle_root(), root.as_deref());
    }

    #[test]
    fn test_transition_commits_to_packet() {
        let fixture = TestFixture::new();
        let payload = fixture.transition().extra_payload.unwrap();

        assert_eq!(payload.hash_st_packet, fixture.packet.hash());
        assert_eq!(payload.reg_tx_id, REG_TX_ID);
    }

    #[tokio::test]
    async fn test_fixture_provider() {
        let fixture = TestFixture::new();

        let registration = fixture.provider.fetch_transaction(REG_TX_ID).await.unwrap();
        assert_eq!(registration, Some(registration_fixture(6)));

        let contract = fixture
            .provider
            .fetch_contract(fixture.packet.contract_id())
            .await
            .unwrap();
        assert_eq!(contract, Some(fixture.contract.clone()));
    }
}
