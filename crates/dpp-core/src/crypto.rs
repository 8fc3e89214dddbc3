//! Hashing primitive for content integrity and identity derivation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte Blake3 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blake3Hash(pub [u8; 32]);

impl Blake3Hash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

/// Binary merkle root over `leaves`, in order.
///
/// Each level hashes `left || right`; an odd last node is paired with itself.
/// `None` when there are no leaves.
pub fn merkle_root(mut leaves: Vec<Blake3Hash>) -> Option<Blake3Hash> {
    if leaves.is_empty() {
        return None;
    }
    while leaves.len() > 1 {
        leaves = leaves
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let mut data = Vec::with_capacity(64);
                data.extend_from_slice(left.as_bytes());
                data.extend_from_slice(right.as_bytes());
                Blake3Hash::hash(&data)
            })
            .collect();
    }
    leaves.pop()
}

impl fmt::Debug for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake3({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Blake3Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_hash() {
        let h1 = Blake3Hash::hash(b"test data");
        let h2 = Blake3Hash::hash(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, Blake3Hash::hash(b"different data"));
    }

    #[test]
    fn test_hex_roundtrip() {
        let hash = Blake3Hash::hash(b"abc");
        assert_eq!(Blake3Hash::from_hex(&hash.to_hex()).unwrap(), hash);
        assert!(Blake3Hash::from_hex("abcd").is_err());
    }

    #[test]
    fn test_merkle_root() {
        let a = Blake3Hash::hash(b"a");
        let b = Blake3Hash::hash(b"b");
        let c = Blake3Hash::hash(b"c");

        assert_eq!(merkle_root(vec![]), None);
        assert_eq!(merkle_root(vec![a]), Some(a));

        let ab = Blake3Hash::hash(&[a.0, b.0].concat());
        assert_eq!(merkle_root(vec![a, b]), Some(ab));

        let cc = Blake3Hash::hash(&[c.0, c.0].concat());
        let abc = Blake3Hash::hash(&[ab.0, cc.0].concat());
        assert_eq!(merkle_root(vec![a, b, c]), Some(abc));

        assert_ne!(merkle_root(vec![b, a]), merkle_root(vec![a, b]));
    }

    #[test]
    fn test_display_is_full_hex() {
        let hash = Blake3Hash::hash(b"abc");
        assert_eq!(hash.to_string(), hash.to_hex());
    }
}
