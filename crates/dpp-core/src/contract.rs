//! Contract: a named set of document type definitions.
//!
//! Schema rules for the definitions themselves are enforced by an external
//! validator; this type only carries the raw definition and its identity.

use crate::canonical::encode_value;
use crate::crypto::Blake3Hash;
use crate::error::CoreError;
use crate::types::encode_identifier;
use crate::value::Value;

mod keys {
    pub const NAME: &str = "name";
    pub const DOCUMENTS: &str = "documents";
}

/// A contract definition, content-addressed by its canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    raw: Value,
    id: String,
}

impl Contract {
    /// Wrap a raw contract definition.
    pub fn from_raw(raw: Value) -> Result<Self, CoreError> {
        if raw.as_map().is_none() {
            return Err(CoreError::MalformedContract("expected map".into()));
        }

        let id = encode_identifier(Blake3Hash::hash(&encode_value(&raw)).as_bytes());
        Ok(Self { raw, id })
    }

    /// `base58(blake3(canonical(raw)))`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.raw.get(keys::NAME).and_then(Value::as_str)
    }

    /// Document types defined by this contract.
    pub fn document_types(&self) -> impl Iterator<Item = &str> {
        self.raw
            .get(keys::DOCUMENTS)
            .and_then(Value::as_map)
            .into_iter()
            .flat_map(|definitions| definitions.keys().map(String::as_str))
    }

    pub fn has_document_type(&self, document_type: &str) -> bool {
        self.raw
            .get(keys::DOCUMENTS)
            .and_then(|definitions| definitions.get(document_type))
            .is_some()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn serialize(&self) -> Vec<u8> {
        encode_value(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_contract() -> Value {
        Value::map([
            (keys::NAME, Value::from("lovelyCats")),
            (
                keys::DOCUMENTS,
                Value::map([
                    ("niceCat", Value::map([("properties", Value::empty_map())])),
                    ("prettyCat", Value::map([("properties", Value::empty_map())])),
                ]),
            ),
        ])
    }

    #[test]
    fn test_id_is_content_addressed() {
        let a = Contract::from_raw(raw_contract()).unwrap();
        let b = Contract::from_raw(raw_contract()).unwrap();
        assert_eq!(a.id(), b.id());

        let expected = encode_identifier(Blake3Hash::hash(&a.serialize()).as_bytes());
        assert_eq!(a.id(), expected);

        let renamed = Contract::from_raw(Value::map([(keys::NAME, Value::from("other"))])).unwrap();
        assert_ne!(a.id(), renamed.id());
    }

    #[test]
    fn test_document_types() {
        let contract = Contract::from_raw(raw_contract()).unwrap();

        assert_eq!(contract.name(), Some("lovelyCats"));
        assert_eq!(
            contract.document_types().collect::<Vec<_>>(),
            vec!["niceCat", "prettyCat"]
        );
        assert!(contract.has_document_type("niceCat"));
        assert!(!contract.has_document_type("grumpyCat"));
    }

    #[test]
    fn test_rejects_non_map() {
        assert!(matches!(
            Contract::from_raw(Value::from("nope")),
            Err(CoreError::MalformedContract(_))
        ));
    }
}
