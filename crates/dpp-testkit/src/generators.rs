//! Proptest generators for property-based testing.

use std::collections::BTreeMap;

use proptest::prelude::*;

use dpp_core::{Action, Document, Value};

/// Generate a payload field name. Never a path and never an envelope field.
pub fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,15}".prop_map(String::from)
}

/// Generate a scalar value.
pub fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        "[ -~]{0,24}".prop_map(Value::Text),
    ]
}

/// Generate a nested value of bounded depth.
pub fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(field_name(), inner, 0..4).prop_map(Value::Map),
        ]
    })
}

/// Generate a document payload.
pub fn data() -> impl Strategy<Value = BTreeMap<String, Value>> {
    prop::collection::btree_map(field_name(), value(), 0..6)
}

/// Generate an action that may carry payload.
pub fn payload_action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Create), Just(Action::Update)]
}

/// Parameters for generating a document.
#[derive(Debug, Clone)]
pub struct DocumentParams {
    pub document_type: String,
    pub scope: String,
    pub scope_id: String,
    pub action: Action,
    pub revision: u32,
    pub metadata: Option<Value>,
    pub data: BTreeMap<String, Value>,
}

impl Arbitrary for DocumentParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            "[a-z][a-zA-Z]{0,15}",
            "[0-9a-f]{64}",
            "[1-9A-HJ-NP-Za-km-z]{34}",
            payload_action(),
            1u32..=1000u32,
            proptest::option::of(value()),
            data(),
        )
            .prop_map(
                |(document_type, scope, scope_id, action, revision, metadata, data)| {
                    DocumentParams {
                        document_type,
                        scope,
                        scope_id,
                        action,
                        revision,
                        metadata,
                        data,
                    }
                },
            )
            .boxed()
    }
}

/// Build a document from parameters.
pub fn document_from_params(params: &DocumentParams) -> Document {
    let mut document = Document::new(
        params.document_type.clone(),
        params.scope.clone(),
        params.scope_id.clone(),
    );
    document
        .set_action(params.action)
        .expect("generated documents start without payload");
    document
        .set_revision(params.revision)
        .expect("generated revisions are positive");
    document
        .set_data(params.data.clone())
        .expect("generated actions allow payload");
    if let Some(metadata) = &params.metadata {
        document.set_metadata(metadata.clone());
    }
    document
}

/// Generate a raw document.
pub fn raw_document() -> impl Strategy<Value = Value> {
    any::<DocumentParams>().prop_map(|params| document_from_params(&params).to_raw())
}
