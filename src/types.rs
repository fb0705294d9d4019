//! Shared data model for the approval flow

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction status as reported by the wallet service.
///
/// Statuses outside the known set are preserved verbatim in `Other` so a
/// service-side addition never breaks polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxStatus {
    AwaitingApproval,
    Pending,
    Completed,
    Success,
    Failed,
    Rejected,
    Other(String),
}

impl TxStatus {
    /// Terminal statuses never transition again; everything else is
    /// considered pending and eligible for another poll.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TxStatus::Completed | TxStatus::Success | TxStatus::Failed | TxStatus::Rejected
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            TxStatus::AwaitingApproval => "awaiting-approval",
            TxStatus::Pending => "pending",
            TxStatus::Completed => "completed",
            TxStatus::Success => "success",
            TxStatus::Failed => "failed",
            TxStatus::Rejected => "rejected",
            TxStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for TxStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "awaiting-approval" => TxStatus::AwaitingApproval,
            "pending" => TxStatus::Pending,
            "completed" => TxStatus::Completed,
            "success" => TxStatus::Success,
            "failed" => TxStatus::Failed,
            "rejected" => TxStatus::Rejected,
            _ => TxStatus::Other(raw),
        }
    }
}

impl From<TxStatus> for String {
    fn from(status: TxStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of a transaction, one per poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub status: TxStatus,
    /// On-chain transaction hash, present once the service has broadcast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_chain_hash: Option<String>,
}

/// Identifiers for a smart wallet bound to an external signer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletHandle {
    /// Locator used in API paths (falls back to the wallet address)
    pub locator: String,
    /// The smart wallet's own address
    pub address: String,
}

/// A pending approval extracted from a created transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingApproval {
    /// Hex-encoded 32-byte message hash the service expects signed
    pub message: String,
    /// Locator of the signer the approval must come from
    pub signer_locator: String,
}

/// Result of creating a transfer on the wallet service
#[derive(Debug, Clone)]
pub struct CreatedTransfer {
    pub id: String,
    /// Absent when the service returned no pending approval; the
    /// orchestrator treats that as an unrecoverable precondition violation
    pub pending_approval: Option<PendingApproval>,
}

/// Final report of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct FlowOutcome {
    pub signer_address: String,
    pub wallet_address: String,
    pub transaction_id: String,
    pub final_status: TxStatus,
    pub on_chain_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(TxStatus::Completed.is_terminal());
        assert!(TxStatus::Success.is_terminal());
        assert!(TxStatus::Failed.is_terminal());
        assert!(TxStatus::Rejected.is_terminal());
        assert!(!TxStatus::Pending.is_terminal());
        assert!(!TxStatus::AwaitingApproval.is_terminal());
        assert!(!TxStatus::Other("queued".into()).is_terminal());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for raw in ["pending", "completed", "failed", "awaiting-approval"] {
            let status = TxStatus::from(raw.to_string());
            assert_eq!(String::from(status), raw);
        }

        let unknown = TxStatus::from("confirming".to_string());
        assert_eq!(unknown, TxStatus::Other("confirming".into()));
        assert_eq!(unknown.as_str(), "confirming");
    }

    #[test]
    fn record_deserializes_unknown_status() {
        let record: TransactionRecord =
            serde_json::from_value(serde_json::json!({ "id": "tx1", "status": "queued" }))
                .unwrap();
        assert_eq!(record.status, TxStatus::Other("queued".into()));
        assert!(record.on_chain_hash.is_none());
    }
}
