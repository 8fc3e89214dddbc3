//! Duplicate document detection.
//!
//! Two raw documents are duplicates when they share type and scope, i.e.
//! they would write the same document ID of the same type.

use std::collections::HashMap;

use dpp_core::document::fields;
use dpp_core::Value;

use crate::traits::DuplicateFinder;

/// Duplicate finder keyed on `($type, $scope, $scopeId)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FingerprintDuplicateFinder;

impl DuplicateFinder for FingerprintDuplicateFinder {
    fn find_duplicates(&self, raw_documents: &[Value]) -> Vec<Value> {
        find_duplicate_documents(raw_documents)
    }
}

type Fingerprint<'a> = (Option<&'a Value>, Option<&'a Value>, Option<&'a Value>);

fn fingerprint(raw_document: &Value) -> Fingerprint<'_> {
    (
        raw_document.get(fields::TYPE),
        raw_document.get(fields::SCOPE),
        raw_document.get(fields::SCOPE_ID),
    )
}

/// Return every document whose fingerprint occurs more than once.
///
/// All members of a colliding group are returned, in input order.
pub fn find_duplicate_documents(raw_documents: &[Value]) -> Vec<Value> {
    let mut counts: HashMap<Fingerprint<'_>, usize> = HashMap::new();
    for raw_document in raw_documents {
        *counts.entry(fingerprint(raw_document)).or_default() += 1;
    }

    raw_documents
        .iter()
        .filter(|raw_document| counts[&fingerprint(*raw_document)] > 1)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(document_type: &str, scope_id: &str, name: &str) -> Value {
        Value::map([
            (fields::TYPE, Value::from(document_type)),
            (fields::SCOPE, Value::from("scope")),
            (fields::SCOPE_ID, Value::from(scope_id)),
            ("name", Value::from(name)),
        ])
    }

    #[test]
    fn test_no_duplicates() {
        let documents = vec![
            raw("niceCat", "a", "Cutie"),
            raw("niceCat", "b", "Cutie"),
            raw("prettyCat", "a", "Cutie"),
        ];

        assert!(find_duplicate_documents(&documents).is_empty());
    }

    #[test]
    fn test_duplicates_ignore_payload() {
        let documents = vec![
            raw("niceCat", "a", "Cutie"),
            raw("niceCat", "b", "Grumpy"),
            raw("niceCat", "a", "Fluffy"),
        ];

        let duplicates = FingerprintDuplicateFinder.find_duplicates(&documents);
        assert_eq!(duplicates, vec![documents[0].clone(), documents[2].clone()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(find_duplicate_documents(&[]).is_empty());
    }
}
