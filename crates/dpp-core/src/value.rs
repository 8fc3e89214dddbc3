//! Tagged value tree for raw records, with dotted-path access.
//!
//! Raw documents, contracts and packets arrive as nested key/value
//! structures. [`Value`] models them explicitly so field access is a
//! recursive walk instead of reflection.
//!
//! Paths are split on `.`; a segment may carry trailing `[n]` array indices,
//! so `a.b[0].c` and `a.b.0.c` address the same field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PathError;

/// A node in a raw record.
///
/// Floats are deliberately absent: they have no canonical encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// An empty map.
    pub fn empty_map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Build a map from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a top-level key of a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Retrieve the field at `path`, if every segment resolves.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let segments = parse_path(path).ok()?;
        walk(self, &segments)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

/// Split a path into segments.
///
/// `a.b[2].c` becomes `["a", "b", "2", "c"]`.
pub fn parse_path(path: &str) -> Result<Vec<String>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut segments = Vec::new();
    for part in path.split('.') {
        let key_end = part.find('[').unwrap_or(part.len());
        let (key, mut rest) = part.split_at(key_end);

        if key.is_empty() && rest.is_empty() {
            return Err(PathError::EmptySegment(path.to_string()));
        }
        if !key.is_empty() {
            segments.push(key.to_string());
        }

        while !rest.is_empty() {
            let close = rest
                .find(']')
                .ok_or_else(|| PathError::MalformedIndex(path.to_string()))?;
            let index = &rest[1..close];
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PathError::MalformedIndex(path.to_string()));
            }
            segments.push(index.to_string());

            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(PathError::MalformedIndex(path.to_string()));
            }
        }
    }

    Ok(segments)
}

/// Retrieve a field from a map by path.
pub fn get_path<'a>(map: &'a BTreeMap<String, Value>, path: &str) -> Option<&'a Value> {
    let segments = parse_path(path).ok()?;
    let (head, rest) = segments.split_first()?;
    walk(map.get(head)?, rest)
}

/// Set a field in a map by path, creating intermediate containers.
///
/// A missing or scalar intermediate is replaced by an array when the next
/// segment is an index, and by a map otherwise. Array writes may overwrite
/// an element or append directly after the last one.
pub fn set_path(
    map: &mut BTreeMap<String, Value>,
    path: &str,
    value: Value,
) -> Result<(), PathError> {
    let segments = parse_path(path)?;
    let (head, rest) = segments.split_first().ok_or(PathError::Empty)?;

    // Work on a copy so a failed write leaves the map untouched.
    let mut slot = map.get(head).cloned().unwrap_or_default();
    set_in(&mut slot, rest, value)?;
    map.insert(head.clone(), slot);
    Ok(())
}

/// Remove a field from a map by path, returning the old value.
///
/// Removing an array element shifts the elements after it.
pub fn remove_path(
    map: &mut BTreeMap<String, Value>,
    path: &str,
) -> Result<Option<Value>, PathError> {
    let segments = parse_path(path)?;
    let (last, parents) = segments.split_last().ok_or(PathError::Empty)?;

    let Some((head, rest)) = parents.split_first() else {
        return Ok(map.remove(last));
    };

    let Some(parent) = map.get_mut(head).and_then(|v| walk_mut(v, rest)) else {
        return Ok(None);
    };

    Ok(match parent {
        Value::Map(entries) => entries.remove(last),
        Value::Array(items) => match last.parse::<usize>() {
            Ok(index) if index < items.len() => Some(items.remove(index)),
            _ => None,
        },
        _ => None,
    })
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn walk<'a>(mut current: &'a Value, segments: &[String]) -> Option<&'a Value> {
    for segment in segments {
        current = match current {
            Value::Map(entries) => entries.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn walk_mut<'a>(mut current: &'a mut Value, segments: &[String]) -> Option<&'a mut Value> {
    for segment in segments {
        current = match current {
            Value::Map(entries) => entries.get_mut(segment)?,
            Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn set_in(target: &mut Value, segments: &[String], value: Value) -> Result<(), PathError> {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return Ok(());
    };

    match target {
        Value::Map(entries) => {
            let slot = entries.entry(head.clone()).or_insert(Value::Null);
            set_in(slot, rest, value)
        }
        Value::Array(items) => {
            let index: usize = head
                .parse()
                .map_err(|_| PathError::NotAnIndex(head.clone()))?;
            if index > items.len() {
                return Err(PathError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                });
            }
            if index == items.len() {
                items.push(Value::Null);
            }
            set_in(&mut items[index], rest, value)
        }
        scalar => {
            *scalar = if is_index(head) {
                Value::Array(Vec::new())
            } else {
                Value::empty_map()
            };
            set_in(scalar, segments, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_path_dotted_and_indexed() {
        assert_eq!(parse_path("a.b[2].c").unwrap(), vec!["a", "b", "2", "c"]);
        assert_eq!(parse_path("a.b.2.c").unwrap(), vec!["a", "b", "2", "c"]);
        assert_eq!(parse_path("list[0][1]").unwrap(), vec!["list", "0", "1"]);
    }

    #[test]
    fn test_parse_path_rejects_malformed() {
        assert_eq!(parse_path(""), Err(PathError::Empty));
        assert!(matches!(parse_path("a..b"), Err(PathError::EmptySegment(_))));
        assert!(matches!(parse_path("a[x]"), Err(PathError::MalformedIndex(_))));
        assert!(matches!(parse_path("a[1"), Err(PathError::MalformedIndex(_))));
        assert!(matches!(parse_path("a[1]b"), Err(PathError::MalformedIndex(_))));
    }

    #[test]
    fn test_set_creates_intermediate_maps() {
        let mut map = BTreeMap::new();
        set_path(&mut map, "profile.name.first", "Ada".into()).unwrap();

        assert_eq!(
            get_path(&map, "profile.name.first"),
            Some(&Value::from("Ada"))
        );
        assert!(get_path(&map, "profile.name").unwrap().as_map().is_some());
    }

    #[test]
    fn test_set_creates_arrays_for_index_segments() {
        let mut map = BTreeMap::new();
        set_path(&mut map, "tags[0]", "a".into()).unwrap();
        set_path(&mut map, "tags[1]", "b".into()).unwrap();

        assert_eq!(
            map.get("tags"),
            Some(&Value::Array(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn test_set_rejects_sparse_array_write() {
        let mut map = BTreeMap::new();
        let result = set_path(&mut map, "tags[3]", "x".into());
        assert_eq!(result, Err(PathError::IndexOutOfBounds { index: 3, len: 0 }));
        assert!(map.is_empty());
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut map = BTreeMap::new();
        set_path(&mut map, "a", 1i64.into()).unwrap();
        set_path(&mut map, "a.b", 2i64.into()).unwrap();

        assert_eq!(get_path(&map, "a.b"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_remove_path() {
        let mut map = BTreeMap::new();
        set_path(&mut map, "a.b", 1i64.into()).unwrap();
        set_path(&mut map, "a.c", 2i64.into()).unwrap();

        assert_eq!(remove_path(&mut map, "a.b").unwrap(), Some(Value::Integer(1)));
        assert_eq!(get_path(&map, "a.b"), None);
        assert_eq!(get_path(&map, "a.c"), Some(&Value::Integer(2)));
        assert_eq!(remove_path(&mut map, "missing.x").unwrap(), None);
    }

    #[test]
    fn test_value_deserializes_from_json() {
        let value: Value = serde_json::from_str(r#"{"a": [1, "x", null, true]}"#).unwrap();
        assert_eq!(
            value.get_path("a[1]"),
            Some(&Value::Text("x".to_string()))
        );
        assert_eq!(value.get_path("a.2"), Some(&Value::Null));
    }

    proptest! {
        #[test]
        fn test_set_then_get(keys in prop::collection::vec("[a-z]{1,8}", 1..5), n: i64) {
            let path = keys.join(".");
            let mut map = BTreeMap::new();
            set_path(&mut map, &path, Value::Integer(n)).unwrap();
            prop_assert_eq!(get_path(&map, &path), Some(&Value::Integer(n)));
        }
    }
}
