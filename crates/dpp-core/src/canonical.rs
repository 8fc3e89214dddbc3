//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats
//!
//! Document and packet hashes are taken over these bytes, so the same
//! logical record must produce identical bytes on every node.

use ciborium::value::Value as CborValue;
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::value::Value;

/// Encode a value to canonical CBOR bytes.
pub fn encode_value(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Decode canonical CBOR bytes into a value.
///
/// Input that decodes but would not re-encode to the same bytes (unsorted
/// keys, oversized integers, trailing data) is rejected.
pub fn decode_value(bytes: &[u8]) -> Result<Value, CoreError> {
    let cbor: CborValue =
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))?;

    let value = from_cbor(cbor)?;
    if encode_value(&value) != bytes {
        return Err(CoreError::NonCanonical);
    }

    Ok(value)
}

fn from_cbor(value: CborValue) -> Result<Value, CoreError> {
    match value {
        CborValue::Null => Ok(Value::Null),
        CborValue::Bool(b) => Ok(Value::Bool(b)),
        CborValue::Integer(i) => i64::try_from(i)
            .map(Value::Integer)
            .map_err(|_| CoreError::DecodingError("integer out of range".into())),
        CborValue::Text(s) => Ok(Value::Text(s)),
        CborValue::Array(items) => items
            .into_iter()
            .map(from_cbor)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        CborValue::Map(entries) => {
            let mut map = BTreeMap::new();
            for (key, value) in entries {
                let CborValue::Text(key) = key else {
                    return Err(CoreError::DecodingError("map keys must be text".into()));
                };
                if map.insert(key, from_cbor(value)?).is_some() {
                    return Err(CoreError::DecodingError("duplicate map key".into()));
                }
            }
            Ok(Value::Map(map))
        }
        other => Err(CoreError::DecodingError(format!(
            "unsupported CBOR item: {other:?}"
        ))),
    }
}

/// Recursively encode a value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.push(0xf6),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(items) => encode_array(buf, items),
        Value::Map(entries) => encode_map_canonical(buf, entries),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, items: &[Value]) {
    encode_uint(buf, 4, items.len() as u64);
    for item in items {
        encode_value_to(buf, item);
    }
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded bytes, which for text keys means
/// shorter keys first, then bytewise.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &BTreeMap<String, Value>) {
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_text(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();

        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_integer(&mut buf, -1);
        assert_eq!(buf, vec![0x20]);

        buf.clear();
        encode_integer(&mut buf, i64::MIN);
        assert_eq!(buf[0], 0x3b);
    }

    #[test]
    fn test_map_key_ordering() {
        // "b" sorts before "aa": shorter encoded key first
        let value = Value::map([("aa", Value::Integer(1)), ("b", Value::Integer(2))]);
        let bytes = encode_value(&value);

        assert_eq!(bytes, vec![0xa2, 0x61, b'b', 0x02, 0x62, b'a', b'a', 0x01]);
    }

    #[test]
    fn test_encoding_independent_of_insertion_order() {
        let mut first = BTreeMap::new();
        first.insert("x".to_string(), Value::Integer(1));
        first.insert("y".to_string(), Value::Text("z".into()));

        let mut second = BTreeMap::new();
        second.insert("y".to_string(), Value::Text("z".into()));
        second.insert("x".to_string(), Value::Integer(1));

        assert_eq!(
            encode_value(&Value::Map(first)),
            encode_value(&Value::Map(second))
        );
    }

    #[test]
    fn test_decode_roundtrip() {
        let value = Value::map([
            ("name", Value::from("cat")),
            ("lives", Value::Integer(9)),
            ("tags", Value::Array(vec![Value::Bool(true), Value::Null])),
        ]);
        let bytes = encode_value(&value);
        assert_eq!(decode_value(&bytes).unwrap(), value);
    }

    #[test]
    fn test_decode_rejects_unsorted_keys() {
        // {"aa": 1, "b": 2} with keys in the wrong order
        let bytes = vec![0xa2, 0x62, b'a', b'a', 0x01, 0x61, b'b', 0x02];
        assert!(matches!(decode_value(&bytes), Err(CoreError::NonCanonical)));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode_value(&Value::Integer(1));
        bytes.push(0x00);
        assert!(matches!(decode_value(&bytes), Err(CoreError::NonCanonical)));
    }

    #[test]
    fn test_decode_rejects_floats() {
        // 1.5 as a half-precision float
        let bytes = vec![0xf9, 0x3e, 0x00];
        assert!(matches!(decode_value(&bytes), Err(CoreError::DecodingError(_))));
    }
}
