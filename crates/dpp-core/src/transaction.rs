//! Ledger transaction model.
//!
//! Only the facts the verifier inspects are modelled: the transaction type
//! and the state transition payload linking a packet to a registered user.

use serde::{Deserialize, Serialize};

/// Transaction type codes.
pub mod tx_types {
    pub const NORMAL: u16 = 0;
    pub const SUBTX_REGISTER: u16 = 8;
    pub const SUBTX_TOPUP: u16 = 9;
    pub const SUBTX_RESET_KEY: u16 = 10;
    pub const SUBTX_CLOSE_ACCOUNT: u16 = 11;
    pub const SUBTX_TRANSITION: u16 = 12;
}

/// Lowest transaction version that may carry a special payload.
pub const SPECIAL_TRANSACTION_VERSION: u16 = 3;

/// Payload of a state transition transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPayload {
    /// Registration transaction of the submitting user (the user ID).
    pub reg_tx_id: String,
    /// Hex hash of the packet this transition commits to.
    #[serde(rename = "hashSTPacket")]
    pub hash_st_packet: String,
}

/// The ledger transaction accompanying a packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    pub hash: String,
    pub version: u16,
    pub tx_type: u16,
    pub extra_payload: Option<TransitionPayload>,
}

impl LedgerTransaction {
    /// Build a state transition carrying the given payload.
    pub fn transition(hash: impl Into<String>, payload: TransitionPayload) -> Self {
        Self {
            hash: hash.into(),
            version: SPECIAL_TRANSACTION_VERSION,
            tx_type: tx_types::SUBTX_TRANSITION,
            extra_payload: Some(payload),
        }
    }

    /// Special transactions are versioned 3+ and carry a non-normal type.
    pub fn is_special(&self) -> bool {
        self.version >= SPECIAL_TRANSACTION_VERSION && self.tx_type != tx_types::NORMAL
    }
}

/// A transaction as reported by the ledger data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedTransaction {
    pub hash: String,
    pub confirmations: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TransitionPayload {
        TransitionPayload {
            reg_tx_id: "reg".into(),
            hash_st_packet: "00".into(),
        }
    }

    #[test]
    fn test_transition_is_special() {
        let tx = LedgerTransaction::transition("tx", payload());
        assert!(tx.is_special());
        assert_eq!(tx.tx_type, tx_types::SUBTX_TRANSITION);
    }

    #[test]
    fn test_old_version_is_not_special() {
        let mut tx = LedgerTransaction::transition("tx", payload());
        tx.version = 2;
        assert!(!tx.is_special());
    }

    #[test]
    fn test_normal_type_is_not_special() {
        let mut tx = LedgerTransaction::transition("tx", payload());
        tx.tx_type = tx_types::NORMAL;
        assert!(!tx.is_special());
    }

    #[test]
    fn test_payload_json_field_names() {
        let json = serde_json::to_value(payload()).unwrap();
        assert_eq!(json["regTxId"], "reg");
        assert_eq!(json["hashSTPacket"], "00");
    }
}
