//! End-to-end flow test against a scripted wallet service, driven entirely
//! through the crate's public API.

use std::cell::RefCell;
use std::time::Duration;

use wallet_approver::api::{ApiError, ApiResult, WalletApi};
use wallet_approver::orchestrator::{self, FlowConfig};
use wallet_approver::poller::PollConfig;
use wallet_approver::types::{
    CreatedTransfer, PendingApproval, TransactionRecord, TxStatus, WalletHandle,
};
use wallet_approver::FlowError;

const MESSAGE_HASH: &str = "1111111111111111111111111111111111111111111111111111111111111111";

/// Wallet service stub: one transfer whose status follows a script, with a
/// transient fetch failure injected before the first real answer.
struct ScriptedService {
    statuses: RefCell<Vec<Result<TxStatus, ()>>>,
    approvals_submitted: RefCell<u32>,
}

impl WalletApi for ScriptedService {
    fn create_wallet(&self, signer_address: &str) -> ApiResult<WalletHandle> {
        Ok(WalletHandle {
            locator: "wallet-locator".into(),
            address: format!("0xwallet-for-{}", &signer_address[2..8]),
        })
    }

    fn fund_wallet(&self, _wallet: &WalletHandle, _amount: u64) -> ApiResult<()> {
        Ok(())
    }

    fn create_transfer(
        &self,
        _wallet: &WalletHandle,
        _recipient: &str,
        _amount: &str,
    ) -> ApiResult<CreatedTransfer> {
        Ok(CreatedTransfer {
            id: "transfer-1".into(),
            pending_approval: Some(PendingApproval {
                message: MESSAGE_HASH.into(),
                signer_locator: "external-wallet:signer".into(),
            }),
        })
    }

    fn submit_approval(
        &self,
        _wallet: &WalletHandle,
        _transaction_id: &str,
        _signer_locator: &str,
        signature: &str,
    ) -> ApiResult<()> {
        assert_eq!(signature.len(), 132, "approval signature must be 0x + 130 hex chars");
        *self.approvals_submitted.borrow_mut() += 1;
        Ok(())
    }

    fn fetch_transaction(
        &self,
        _wallet: &WalletHandle,
        transaction_id: &str,
    ) -> ApiResult<TransactionRecord> {
        match self.statuses.borrow_mut().remove(0) {
            Err(()) => Err(ApiError::Malformed("simulated transport failure".into())),
            Ok(status) => Ok(TransactionRecord {
                id: transaction_id.to_string(),
                status,
                on_chain_hash: Some("0xabc123".into()),
            }),
        }
    }
}

fn config(max_attempts: u32) -> FlowConfig {
    FlowConfig {
        recipient: "0x6671f7552df0fbAF762Bd40aEd1cA3ec670d6161".into(),
        amount: "1".into(),
        fund_amount: None,
        poll: PollConfig { interval: Duration::ZERO, max_attempts },
    }
}

#[test]
fn flow_survives_transient_fetch_failure() {
    let service = ScriptedService {
        statuses: RefCell::new(vec![
            Err(()),
            Ok(TxStatus::Pending),
            Ok(TxStatus::Completed),
        ]),
        approvals_submitted: RefCell::new(0),
    };

    let outcome = orchestrator::run(&service, &config(5)).unwrap();

    assert_eq!(outcome.final_status, TxStatus::Completed);
    assert_eq!(outcome.transaction_id, "transfer-1");
    assert_eq!(outcome.on_chain_hash.as_deref(), Some("0xabc123"));
    assert_eq!(*service.approvals_submitted.borrow(), 1);
}

#[test]
fn flow_reports_rejection_as_terminal_success_of_the_poll() {
    let service = ScriptedService {
        statuses: RefCell::new(vec![Ok(TxStatus::Rejected)]),
        approvals_submitted: RefCell::new(0),
    };

    // A rejected transaction is a terminal outcome, not a polling error
    let outcome = orchestrator::run(&service, &config(5)).unwrap();
    assert_eq!(outcome.final_status, TxStatus::Rejected);
}

#[test]
fn flow_times_out_when_transaction_never_finalizes() {
    let service = ScriptedService {
        statuses: RefCell::new(vec![Ok(TxStatus::Pending); 3]),
        approvals_submitted: RefCell::new(0),
    };

    let err = orchestrator::run(&service, &config(3)).unwrap_err();
    match err {
        FlowError::Poll(poll_err) => {
            assert!(poll_err.to_string().contains("pending"));
        }
        other => panic!("expected poll error, got {:?}", other),
    }
}
