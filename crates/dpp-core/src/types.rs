//! Text identifiers.
//!
//! Hash bytes are presented to users as base58 strings, the same alphabet
//! the ledger uses for addresses.

/// Encode identifier bytes as base58 text.
pub fn encode_identifier(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_identifier() {
        assert_eq!(encode_identifier(b"hello"), "Cn8eVZg");
        assert_eq!(encode_identifier(&[0, 0, 1]), "112");
    }
}
