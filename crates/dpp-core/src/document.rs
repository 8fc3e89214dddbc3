//! Document: a single record of application data.
//!
//! A document is identified by the hash of its scope, versioned by a
//! revision counter, and tagged with the action it performs when applied.
//! Raw documents carry six envelope fields under the `$` system prefix; every
//! other key, including any other `$` key, is payload.
//!
//! A document with action [`Action::Delete`] never carries payload. The rule
//! is enforced on every mutation, including construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::canonical::{decode_value, encode_value};
use crate::crypto::Blake3Hash;
use crate::error::{CoreError, DocumentError};
use crate::types::encode_identifier;
use crate::value::{self, Value};

/// Revision assigned when the raw document carries none.
pub const DEFAULT_REVISION: u32 = 1;

/// Envelope field names.
pub mod fields {
    pub const TYPE: &str = "$type";
    pub const SCOPE: &str = "$scope";
    pub const SCOPE_ID: &str = "$scopeId";
    pub const ACTION: &str = "$action";
    pub const REVISION: &str = "$rev";
    pub const META: &str = "$meta";

    pub const ALL: [&str; 6] = [TYPE, SCOPE, SCOPE_ID, ACTION, REVISION, META];

    /// Whether `key` names an envelope field.
    pub fn is_envelope(key: &str) -> bool {
        ALL.contains(&key)
    }
}

/// The effect a document has when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    #[default]
    Create = 0,
    Update = 1,
    Delete = 2,
}

impl Action {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Create),
            1 => Some(Self::Update),
            2 => Some(Self::Delete),
            _ => None,
        }
    }
}

/// A raw document split into envelope fields and payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    pub document_type: Option<String>,
    pub scope: Option<String>,
    pub scope_id: Option<String>,
    pub action: Option<Action>,
    pub revision: Option<u32>,
    pub metadata: Option<Value>,
    pub data: BTreeMap<String, Value>,
}

impl RawDocument {
    /// Destructure a raw record.
    ///
    /// Fails if the record is not a map or an envelope field has the wrong
    /// shape.
    pub fn parse(raw: &Value) -> Result<Self, CoreError> {
        let map = raw
            .as_map()
            .ok_or_else(|| CoreError::MalformedDocument("expected map".into()))?;

        let mut parsed = RawDocument::default();
        for (key, value) in map {
            match key.as_str() {
                fields::TYPE => parsed.document_type = Some(expect_text(key, value)?),
                fields::SCOPE => parsed.scope = Some(expect_text(key, value)?),
                fields::SCOPE_ID => parsed.scope_id = Some(expect_text(key, value)?),
                fields::ACTION => {
                    let action = value.as_i64().and_then(Action::from_i64).ok_or_else(|| {
                        CoreError::MalformedDocument(format!("invalid {key}: {value:?}"))
                    })?;
                    parsed.action = Some(action);
                }
                fields::REVISION => {
                    let revision = value
                        .as_i64()
                        .and_then(|r| u32::try_from(r).ok())
                        .filter(|r| *r > 0)
                        .ok_or_else(|| {
                            CoreError::MalformedDocument(format!("invalid {key}: {value:?}"))
                        })?;
                    parsed.revision = Some(revision);
                }
                fields::META => parsed.metadata = Some(value.clone()),
                _ => {
                    parsed.data.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(parsed)
    }
}

fn expect_text(key: &str, value: &Value) -> Result<String, CoreError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CoreError::MalformedDocument(format!("{key} must be a string")))
}

/// Options for [`Document::serialize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    /// Omit `$meta` from the encoded bytes.
    pub skip_metadata: bool,
}

/// A document.
///
/// `scope` and `scope_id` are fixed at construction; the identifier derived
/// from them is computed on first use and cached.
#[derive(Debug, Clone)]
pub struct Document {
    id: OnceLock<String>,
    document_type: String,
    scope: String,
    scope_id: String,
    action: Action,
    revision: u32,
    metadata: Option<Value>,
    data: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document with default action and revision.
    pub fn new(
        document_type: impl Into<String>,
        scope: impl Into<String>,
        scope_id: impl Into<String>,
    ) -> Self {
        Self {
            id: OnceLock::new(),
            document_type: document_type.into(),
            scope: scope.into(),
            scope_id: scope_id.into(),
            action: Action::default(),
            revision: DEFAULT_REVISION,
            metadata: None,
            data: BTreeMap::new(),
        }
    }

    /// Construct a document from a raw record.
    ///
    /// Payload fields are applied one at a time through [`Document::set`], so
    /// a raw `DELETE` document with payload is rejected here.
    pub fn from_raw(raw: &Value) -> Result<Self, CoreError> {
        let parsed = RawDocument::parse(raw)?;

        let mut document = Self::new(
            parsed.document_type.unwrap_or_default(),
            parsed.scope.unwrap_or_default(),
            parsed.scope_id.unwrap_or_default(),
        );
        document.action = parsed.action.unwrap_or_default();
        document.revision = parsed.revision.unwrap_or(DEFAULT_REVISION);
        document.metadata = parsed.metadata;
        document.set_data(parsed.data)?;

        Ok(document)
    }

    /// Decode a document from its serialized form.
    pub fn from_serialized(bytes: &[u8]) -> Result<Self, CoreError> {
        Self::from_raw(&decode_value(bytes)?)
    }

    /// The document identifier: `base58(blake3(scope ++ scope_id))`.
    pub fn id(&self) -> &str {
        self.id.get_or_init(|| {
            let mut seed = String::with_capacity(self.scope.len() + self.scope_id.len());
            seed.push_str(&self.scope);
            seed.push_str(&self.scope_id);
            encode_identifier(Blake3Hash::hash(seed.as_bytes()).as_bytes())
        })
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn scope_id(&self) -> &str {
        &self.scope_id
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Set the action.
    ///
    /// Switching to `DELETE` requires the payload to be empty.
    pub fn set_action(&mut self, action: Action) -> Result<(), DocumentError> {
        if action == Action::Delete && !self.data.is_empty() {
            return Err(self.delete_violation());
        }

        self.action = action;
        Ok(())
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn set_revision(&mut self, revision: u32) -> Result<(), DocumentError> {
        if revision == 0 {
            return Err(DocumentError::InvalidRevision);
        }

        self.revision = revision;
        Ok(())
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    pub fn set_metadata(&mut self, metadata: Value) {
        self.metadata = Some(metadata);
    }

    /// Detach metadata. Absent metadata is distinct from an empty map.
    pub fn remove_metadata(&mut self) {
        self.metadata = None;
    }

    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    /// Replace the whole payload.
    ///
    /// Every entry goes through [`Document::set`]; on failure the previous
    /// payload is kept.
    pub fn set_data(&mut self, data: BTreeMap<String, Value>) -> Result<(), DocumentError> {
        let previous = std::mem::take(&mut self.data);

        for (path, value) in data {
            if let Err(e) = self.set(&path, value) {
                self.data = previous;
                return Err(e);
            }
        }

        Ok(())
    }

    /// Retrieve the field at `path`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        value::get_path(&self.data, path)
    }

    /// Set the field at `path`, creating intermediate containers.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), DocumentError> {
        if self.action == Action::Delete {
            return Err(self.delete_violation());
        }
        let head = path.split(['.', '[']).next().unwrap_or_default();
        if fields::is_envelope(head) {
            return Err(DocumentError::ReservedField(path.to_string()));
        }

        value::set_path(&mut self.data, path, value)?;
        Ok(())
    }

    /// Remove the field at `path`, returning its previous value.
    pub fn remove(&mut self, path: &str) -> Result<Option<Value>, DocumentError> {
        Ok(value::remove_path(&mut self.data, path)?)
    }

    /// The raw form: envelope fields merged with the payload.
    pub fn to_raw(&self) -> Value {
        let mut map = self.data.clone();
        map.insert(fields::TYPE.into(), Value::from(self.document_type.as_str()));
        map.insert(fields::SCOPE.into(), Value::from(self.scope.as_str()));
        map.insert(fields::SCOPE_ID.into(), Value::from(self.scope_id.as_str()));
        map.insert(fields::REVISION.into(), Value::from(self.revision));
        map.insert(
            fields::ACTION.into(),
            Value::Integer(self.action.to_u8().into()),
        );
        if let Some(metadata) = &self.metadata {
            map.insert(fields::META.into(), metadata.clone());
        }
        Value::Map(map)
    }

    /// Canonical bytes of the raw form.
    pub fn serialize(&self, options: SerializeOptions) -> Vec<u8> {
        let mut raw = self.to_raw();
        if options.skip_metadata {
            if let Value::Map(map) = &mut raw {
                map.remove(fields::META);
            }
        }
        encode_value(&raw)
    }

    /// Hex content hash. Metadata does not contribute.
    pub fn hash(&self) -> String {
        let bytes = self.serialize(SerializeOptions {
            skip_metadata: true,
        });
        Blake3Hash::hash(&bytes).to_hex()
    }

    fn delete_violation(&self) -> DocumentError {
        DocumentError::DataNotAllowedWithDelete {
            document: Box::new(self.clone()),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // The cached id is derived, so it takes no part in equality.
        self.document_type == other.document_type
            && self.scope == other.scope
            && self.scope_id == other.scope_id
            && self.action == other.action
            && self.revision == other.revision
            && self.metadata == other.metadata
            && self.data == other.data
    }
}

impl Eq for Document {}
