//! StPacket: the bundle of contracts and documents submitted for consensus.
//!
//! Items are kept raw. Structural validation happens later, item by item,
//! so that one malformed document does not hide problems in the others.
//!
//! The header commits to the items through two digests, `itemsHash` and
//! `itemsMerkleRoot`. Both are absent for a packet without items.

use crate::canonical::encode_value;
use crate::crypto::{merkle_root, Blake3Hash};
use crate::error::CoreError;
use crate::value::Value;

/// Raw packet keys.
pub mod keys {
    pub const CONTRACT_ID: &str = "contractId";
    pub const ITEMS_MERKLE_ROOT: &str = "itemsMerkleRoot";
    pub const ITEMS_HASH: &str = "itemsHash";
    pub const CONTRACTS: &str = "contracts";
    pub const DOCUMENTS: &str = "documents";
}

/// Options for [`StPacket::serialize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PacketSerializeOptions {
    /// Encode `contracts` and `documents` as empty sequences.
    pub skip_items: bool,
}

/// A state transition packet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StPacket {
    contract_id: String,
    items_merkle_root: Option<String>,
    items_hash: Option<String>,
    contracts: Vec<Value>,
    documents: Vec<Value>,
}

impl StPacket {
    /// Create an empty packet for the given contract.
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            ..Self::default()
        }
    }

    /// Destructure a raw packet.
    pub fn from_raw(raw: &Value) -> Result<Self, CoreError> {
        let map = raw
            .as_map()
            .ok_or_else(|| CoreError::MalformedPacket("expected map".into()))?;

        let text = |key: &str| -> Result<Option<String>, CoreError> {
            match map.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::Text(s)) => Ok(Some(s.clone())),
                Some(_) => Err(CoreError::MalformedPacket(format!("{key} must be a string"))),
            }
        };
        let items = |key: &str| -> Result<Vec<Value>, CoreError> {
            match map.get(key) {
                None => Ok(Vec::new()),
                Some(Value::Array(items)) => Ok(items.clone()),
                Some(_) => Err(CoreError::MalformedPacket(format!("{key} must be an array"))),
            }
        };

        for key in map.keys() {
            if ![
                keys::CONTRACT_ID,
                keys::ITEMS_MERKLE_ROOT,
                keys::ITEMS_HASH,
                keys::CONTRACTS,
                keys::DOCUMENTS,
            ]
            .contains(&key.as_str())
            {
                return Err(CoreError::MalformedPacket(format!("unknown field {key}")));
            }
        }

        Ok(Self {
            contract_id: text(keys::CONTRACT_ID)?
                .ok_or_else(|| CoreError::MalformedPacket("contractId is missing".into()))?,
            items_merkle_root: text(keys::ITEMS_MERKLE_ROOT)?,
            items_hash: text(keys::ITEMS_HASH)?,
            contracts: items(keys::CONTRACTS)?,
            documents: items(keys::DOCUMENTS)?,
        })
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    pub fn items_merkle_root(&self) -> Option<&str> {
        self.items_merkle_root.as_deref()
    }

    pub fn set_items_merkle_root(&mut self, root: impl Into<String>) {
        self.items_merkle_root = Some(root.into());
    }

    pub fn items_hash(&self) -> Option<&str> {
        self.items_hash.as_deref()
    }

    pub fn set_items_hash(&mut self, hash: impl Into<String>) {
        self.items_hash = Some(hash.into());
    }

    /// The embedded contract definition, if any.
    pub fn contract(&self) -> Option<&Value> {
        self.contracts.first()
    }

    pub fn contracts(&self) -> &[Value] {
        &self.contracts
    }

    /// Replace the embedded contract definition.
    pub fn set_contract(&mut self, raw_contract: Value) {
        self.contracts = vec![raw_contract];
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub fn set_documents(&mut self, raw_documents: Vec<Value>) {
        self.documents = raw_documents;
    }

    pub fn add_document(&mut self, raw_document: Value) {
        self.documents.push(raw_document);
    }

    /// Recompute `itemsHash` and `itemsMerkleRoot` from the current items.
    pub fn update_item_digests(&mut self) {
        self.items_hash = calculate_items_hash(self).map(|hash| hash.to_hex());
        self.items_merkle_root = calculate_items_merkle_root(self).map(|root| root.to_hex());
    }

    /// The raw form.
    pub fn to_raw(&self, options: PacketSerializeOptions) -> Value {
        let (contracts, documents) = if options.skip_items {
            (Vec::new(), Vec::new())
        } else {
            (self.contracts.clone(), self.documents.clone())
        };

        let mut entries = vec![
            (keys::CONTRACT_ID, Value::from(self.contract_id.as_str())),
            (keys::CONTRACTS, Value::Array(contracts)),
            (keys::DOCUMENTS, Value::Array(documents)),
        ];
        if let Some(root) = &self.items_merkle_root {
            entries.push((keys::ITEMS_MERKLE_ROOT, Value::from(root.as_str())));
        }
        if let Some(hash) = &self.items_hash {
            entries.push((keys::ITEMS_HASH, Value::from(hash.as_str())));
        }

        Value::map(entries)
    }

    pub fn serialize(&self, options: PacketSerializeOptions) -> Vec<u8> {
        encode_value(&self.to_raw(options))
    }

    /// Hex hash of the packet header.
    ///
    /// Items are skipped: their integrity is carried by `itemsMerkleRoot` and
    /// `itemsHash`, which are part of the header.
    pub fn hash(&self) -> String {
        let bytes = self.serialize(PacketSerializeOptions { skip_items: true });
        Blake3Hash::hash(&bytes).to_hex()
    }
}

/// Hash over the canonical `{contracts, documents}` record.
///
/// `None` when the packet carries no items.
pub fn calculate_items_hash(packet: &StPacket) -> Option<Blake3Hash> {
    if packet.contracts.is_empty() && packet.documents.is_empty() {
        return None;
    }

    let items = Value::map([
        (keys::CONTRACTS, Value::Array(packet.contracts.clone())),
        (keys::DOCUMENTS, Value::Array(packet.documents.clone())),
    ]);
    Some(Blake3Hash::hash(&encode_value(&items)))
}

/// Merkle root over the item hashes, contracts first, then documents.
///
/// `None` when the packet carries no items.
pub fn calculate_items_merkle_root(packet: &StPacket) -> Option<Blake3Hash> {
    let leaves = packet
        .contracts
        .iter()
        .chain(&packet.documents)
        .map(|item| Blake3Hash::hash(&encode_value(item)))
        .collect();
    merkle_root(leaves)
}
