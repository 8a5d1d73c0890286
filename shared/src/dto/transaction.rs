//! # Transaction Lifecycle
//!
//! Writes are tracked tasks rather than fire-and-forget calls:
//!
//! ```text
//! Idle → AwaitingSignature → Pending { hash } → Mined { hash, block } | Reverted { hash }
//!                 └────────────────────→ Failed { reason }
//! ```
//!
//! A tracker is busy between `AwaitingSignature` and settlement; the submit button bound
//! to it stays disabled for that whole window.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::parse_quantity;

/// Receipt returned by `eth_getTransactionReceipt`.
///
/// Only the fields the dApp reads are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
    /// `0x1` for success, `0x0` for revert. Absent on pre-Byzantium chains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => parse_quantity(status).map(|s| !s.is_zero()).unwrap_or(false),
            None => true,
        }
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
            .as_deref()
            .and_then(|n| parse_quantity(n).ok())
            .and_then(|n| u64::try_from(n).ok())
    }
}

/// State of one write operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TxStatus {
    #[default]
    Idle,
    AwaitingSignature,
    Pending { hash: String },
    Mined { hash: String, block: Option<u64> },
    Reverted { hash: String },
    Failed { reason: String },
}

impl TxStatus {
    /// True while the transaction is waiting for a signature or for mining.
    pub fn is_busy(&self) -> bool {
        matches!(self, TxStatus::AwaitingSignature | TxStatus::Pending { .. })
    }

    pub fn hash(&self) -> Option<&str> {
        match self {
            TxStatus::Pending { hash } | TxStatus::Mined { hash, .. } | TxStatus::Reverted { hash } => {
                Some(hash.as_str())
            }
            _ => None,
        }
    }

    /// Short status line shown under a submit button.
    pub fn label(&self) -> Option<String> {
        match self {
            TxStatus::Idle => None,
            TxStatus::AwaitingSignature => Some("Confirm the transaction in your wallet...".to_string()),
            TxStatus::Pending { .. } => Some("Transaction pending...".to_string()),
            TxStatus::Mined { block: Some(block), .. } => Some(format!("Confirmed in block {}", block)),
            TxStatus::Mined { block: None, .. } => Some("Confirmed".to_string()),
            TxStatus::Reverted { .. } => Some("Transaction reverted".to_string()),
            TxStatus::Failed { reason } => Some(reason.clone()),
        }
    }

    /// Start a new write. Fails while a previous one is still in flight.
    pub fn begin(&mut self) -> Result<()> {
        if self.is_busy() {
            return Err(AppError::Busy("transaction".to_string()));
        }
        *self = TxStatus::AwaitingSignature;
        Ok(())
    }

    /// The provider accepted and broadcast the transaction.
    pub fn submitted(&mut self, hash: impl Into<String>) -> Result<()> {
        match self {
            TxStatus::AwaitingSignature => {
                *self = TxStatus::Pending { hash: hash.into() };
                Ok(())
            }
            other => Err(AppError::InvalidTransition(format!(
                "transaction submitted while {:?}",
                other
            ))),
        }
    }

    /// Signing or broadcasting failed before a hash existed.
    pub fn failed(&mut self, err: &AppError) {
        *self = TxStatus::Failed {
            reason: err.short_message(),
        };
    }

    /// Settle a pending transaction from its receipt. Returns an error for a revert so the
    /// caller can surface it like any other failure.
    pub fn settle(&mut self, receipt: &TransactionReceipt) -> Result<()> {
        let hash = match self {
            TxStatus::Pending { hash } => hash.clone(),
            other => {
                return Err(AppError::InvalidTransition(format!(
                    "receipt arrived while {:?}",
                    other
                )))
            }
        };

        if receipt.succeeded() {
            *self = TxStatus::Mined {
                hash,
                block: receipt.block_number(),
            };
            Ok(())
        } else {
            *self = TxStatus::Reverted { hash: hash.clone() };
            Err(AppError::Reverted(hash))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

    fn receipt(status: Option<&str>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: HASH.to_string(),
            block_number: Some("0x1b4".to_string()),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_successful_lifecycle() {
        let mut tx = TxStatus::default();
        assert!(!tx.is_busy());

        tx.begin().unwrap();
        assert!(tx.is_busy());
        tx.submitted(HASH).unwrap();
        assert_eq!(tx.hash(), Some(HASH));
        assert!(tx.is_busy());

        tx.settle(&receipt(Some("0x1"))).unwrap();
        assert_eq!(
            tx,
            TxStatus::Mined {
                hash: HASH.to_string(),
                block: Some(436)
            }
        );
        assert!(!tx.is_busy());
        assert_eq!(tx.label().as_deref(), Some("Confirmed in block 436"));
    }

    #[test]
    fn test_revert_is_reported() {
        let mut tx = TxStatus::default();
        tx.begin().unwrap();
        tx.submitted(HASH).unwrap();
        let err = tx.settle(&receipt(Some("0x0"))).unwrap_err();
        assert_eq!(err, AppError::Reverted(HASH.to_string()));
        assert!(matches!(tx, TxStatus::Reverted { .. }));
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let mut tx = TxStatus::default();
        tx.begin().unwrap();
        assert!(matches!(tx.begin(), Err(AppError::Busy(_))));
    }

    #[test]
    fn test_failure_releases_trigger() {
        let mut tx = TxStatus::default();
        tx.begin().unwrap();
        tx.failed(&AppError::NotConnected);
        assert!(!tx.is_busy());
        assert_eq!(tx.label().as_deref(), Some("Connect your wallet first"));
        tx.begin().unwrap();
    }

    #[test]
    fn test_receipt_without_status_counts_as_success() {
        assert!(receipt(None).succeeded());
        assert!(!receipt(Some("garbage")).succeeded());
    }

    #[test]
    fn test_receipt_deserializes_from_rpc_json() {
        let json = serde_json::json!({
            "transactionHash": HASH,
            "blockNumber": "0x10",
            "status": "0x1",
            "gasUsed": "0x5208",
            "logs": []
        });
        let receipt: TransactionReceipt = serde_json::from_value(json).unwrap();
        assert_eq!(receipt.block_number(), Some(16));
        assert!(receipt.succeeded());
    }
}
