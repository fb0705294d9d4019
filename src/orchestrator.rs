//! Flow Orchestration
//!
//! Pure sequencing: keygen, wallet creation, optional funding, transfer
//! creation, approval signing, approval submission, polling. The key pair is
//! generated here and handed to the signer by value; no component holds
//! ambient key state. Missing fields in external responses abort the run —
//! they indicate a service contract violation, not a transient condition.

use crate::api::WalletApi;
use crate::error::{FlowError, FlowResult};
use crate::log_info;
use crate::poller::{self, PollConfig};
use crate::signer;
use crate::types::FlowOutcome;
use crate::wallet::EvmKeypair;

const MODULE: &str = "orchestrator";

/// Run parameters; all configuration is passed in, nothing is read from the
/// environment here
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub recipient: String,
    pub amount: String,
    /// Test-token top-up before the transfer; skipped when `None`
    pub fund_amount: Option<u64>,
    pub poll: PollConfig,
}

/// Drive one transaction from key generation to a terminal status
pub fn run<A: WalletApi>(api: &A, cfg: &FlowConfig) -> FlowResult<FlowOutcome> {
    let keypair = EvmKeypair::generate()?;
    log_info!(MODULE, "generated signer keypair", signer_address = keypair.address());

    let wallet = api.create_wallet(keypair.address()).map_err(FlowError::api("create-wallet"))?;
    if wallet.address.is_empty() {
        return Err(FlowError::Precondition(
            "wallet service returned an empty wallet address".into(),
        ));
    }

    if let Some(amount) = cfg.fund_amount {
        api.fund_wallet(&wallet, amount).map_err(FlowError::api("fund-wallet"))?;
    }

    let created = api
        .create_transfer(&wallet, &cfg.recipient, &cfg.amount)
        .map_err(FlowError::api("create-transfer"))?;
    log_info!(MODULE, "transfer created", tx_id = created.id);

    let approval = created.pending_approval.ok_or_else(|| {
        FlowError::Precondition("no pending approval present on the created transfer".into())
    })?;

    let signature = signer::sign_message_hash(&approval.message, keypair.secret_key())?;
    log_info!(
        MODULE,
        "approval message signed",
        message = approval.message,
        signature = signature.to_hex(),
    );

    api.submit_approval(&wallet, &created.id, &approval.signer_locator, &signature.to_hex())
        .map_err(FlowError::api("submit-approval"))?;

    let record =
        poller::poll_until_terminal(&created.id, |id| api.fetch_transaction(&wallet, id), &cfg.poll)?;

    log_info!(
        MODULE,
        "transaction reached terminal state",
        tx_id = record.id,
        status = record.status,
    );

    Ok(FlowOutcome {
        signer_address: keypair.address().to_string(),
        wallet_address: wallet.address,
        transaction_id: record.id,
        final_status: record.status,
        on_chain_hash: record.on_chain_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult};
    use crate::signer::{recover_address, EvmSignature};
    use crate::types::{CreatedTransfer, PendingApproval, TransactionRecord, TxStatus, WalletHandle};
    use crate::utils::crypto::decode_fixed_hex;
    use std::cell::RefCell;
    use std::time::Duration;

    const MESSAGE_HASH: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    /// Scripted wallet service capturing what the orchestrator submits
    struct MockApi {
        wallet_address: String,
        pending_approval: Option<PendingApproval>,
        statuses: RefCell<Vec<TxStatus>>,
        submitted_signature: RefCell<Option<String>>,
        funded: RefCell<Option<u64>>,
    }

    impl MockApi {
        fn happy(statuses: Vec<TxStatus>) -> Self {
            Self {
                wallet_address: "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0".into(),
                pending_approval: Some(PendingApproval {
                    message: MESSAGE_HASH.into(),
                    signer_locator: "external-wallet:signer".into(),
                }),
                statuses: RefCell::new(statuses),
                submitted_signature: RefCell::new(None),
                funded: RefCell::new(None),
            }
        }
    }

    impl WalletApi for MockApi {
        fn create_wallet(&self, signer_address: &str) -> ApiResult<WalletHandle> {
            assert!(signer_address.starts_with("0x"));
            Ok(WalletHandle {
                locator: "wallet-1".into(),
                address: self.wallet_address.clone(),
            })
        }

        fn fund_wallet(&self, _wallet: &WalletHandle, amount: u64) -> ApiResult<()> {
            *self.funded.borrow_mut() = Some(amount);
            Ok(())
        }

        fn create_transfer(
            &self,
            _wallet: &WalletHandle,
            _recipient: &str,
            _amount: &str,
        ) -> ApiResult<CreatedTransfer> {
            Ok(CreatedTransfer {
                id: "tx-1".into(),
                pending_approval: self.pending_approval.clone(),
            })
        }

        fn submit_approval(
            &self,
            _wallet: &WalletHandle,
            transaction_id: &str,
            signer_locator: &str,
            signature: &str,
        ) -> ApiResult<()> {
            assert_eq!(transaction_id, "tx-1");
            assert_eq!(signer_locator, "external-wallet:signer");
            *self.submitted_signature.borrow_mut() = Some(signature.to_string());
            Ok(())
        }

        fn fetch_transaction(
            &self,
            _wallet: &WalletHandle,
            transaction_id: &str,
        ) -> ApiResult<TransactionRecord> {
            let mut statuses = self.statuses.borrow_mut();
            if statuses.is_empty() {
                return Err(ApiError::Malformed("script exhausted".into()));
            }
            let status = statuses.remove(0);
            Ok(TransactionRecord {
                id: transaction_id.to_string(),
                status,
                on_chain_hash: Some("0xdeadbeef".into()),
            })
        }
    }

    fn test_config() -> FlowConfig {
        FlowConfig {
            recipient: "0x6671f7552df0fbAF762Bd40aEd1cA3ec670d6161".into(),
            amount: "1".into(),
            fund_amount: Some(10),
            poll: PollConfig { interval: Duration::ZERO, max_attempts: 5 },
        }
    }

    #[test]
    fn happy_path_produces_terminal_outcome() {
        let api = MockApi::happy(vec![TxStatus::Pending, TxStatus::Completed]);
        let outcome = run(&api, &test_config()).unwrap();

        assert_eq!(outcome.final_status, TxStatus::Completed);
        assert_eq!(outcome.transaction_id, "tx-1");
        assert_eq!(outcome.wallet_address, api.wallet_address);
        assert_eq!(*api.funded.borrow(), Some(10));
        assert!(outcome.on_chain_hash.is_some());
    }

    #[test]
    fn submitted_signature_recovers_to_generated_signer() {
        let api = MockApi::happy(vec![TxStatus::Completed]);
        let outcome = run(&api, &test_config()).unwrap();

        let submitted = api.submitted_signature.borrow().clone().unwrap();
        assert_eq!(submitted.len(), 132);
        assert!(submitted.starts_with("0x"));

        let bytes = hex::decode(&submitted[2..]).unwrap();
        let signature = EvmSignature::from_bytes(&bytes).unwrap();
        let hash: [u8; 32] = decode_fixed_hex(MESSAGE_HASH).unwrap();
        let recovered = recover_address(&hash, &signature).unwrap();
        assert!(recovered.eq_ignore_ascii_case(&outcome.signer_address));
    }

    #[test]
    fn funding_skipped_when_not_configured() {
        let api = MockApi::happy(vec![TxStatus::Completed]);
        let mut cfg = test_config();
        cfg.fund_amount = None;
        run(&api, &cfg).unwrap();
        assert!(api.funded.borrow().is_none());
    }

    #[test]
    fn missing_pending_approval_aborts() {
        let mut api = MockApi::happy(vec![TxStatus::Completed]);
        api.pending_approval = None;

        let err = run(&api, &test_config()).unwrap_err();
        assert!(matches!(err, FlowError::Precondition(_)));
        assert!(api.submitted_signature.borrow().is_none());
    }

    #[test]
    fn empty_wallet_address_aborts() {
        let mut api = MockApi::happy(vec![TxStatus::Completed]);
        api.wallet_address = String::new();

        let err = run(&api, &test_config()).unwrap_err();
        assert!(matches!(err, FlowError::Precondition(_)));
    }

    #[test]
    fn polling_timeout_surfaces_as_poll_error() {
        let api = MockApi::happy(vec![
            TxStatus::Pending,
            TxStatus::Pending,
            TxStatus::Pending,
        ]);
        let mut cfg = test_config();
        cfg.poll.max_attempts = 3;

        let err = run(&api, &cfg).unwrap_err();
        assert!(matches!(err, FlowError::Poll(_)));
    }

    #[test]
    fn malformed_approval_message_aborts_before_submission() {
        let mut api = MockApi::happy(vec![TxStatus::Completed]);
        api.pending_approval = Some(PendingApproval {
            message: "0xdead".into(), // not 32 bytes
            signer_locator: "external-wallet:signer".into(),
        });

        let err = run(&api, &test_config()).unwrap_err();
        assert!(matches!(err, FlowError::Signing(_)));
        assert!(api.submitted_signature.borrow().is_none());
    }
}
