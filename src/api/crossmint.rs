//! Crossmint HTTP client
//!
//! Implements `WalletApi` against the Crossmint smart-wallet REST API.
//! Response parsing is factored into pure functions over `serde_json::Value`
//! so the shapes can be tested without a network.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{json, Value};

use super::{ApiError, ApiResult, WalletApi};
use crate::log_debug;
use crate::log_info;
use crate::types::{CreatedTransfer, PendingApproval, TransactionRecord, TxStatus, WalletHandle};

const MODULE: &str = "api";
const WALLET_API_VERSION: &str = "2025-06-09";

pub struct CrossmintClient {
    client: Client,
    base_url: String,
    api_key: String,
    network: String,
}

impl CrossmintClient {
    pub fn new(base_url: &str, api_key: &str, network: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            network: network.to_string(),
        })
    }

    fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        self.execute(self.client.post(format!("{}{}", self.base_url, path)).json(body))
    }

    fn get(&self, path: &str) -> ApiResult<Value> {
        self.execute(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn execute(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ApiError::Http { status: status.as_u16(), body });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

impl WalletApi for CrossmintClient {
    fn create_wallet(&self, signer_address: &str) -> ApiResult<WalletHandle> {
        log_info!(MODULE, "creating smart wallet", signer_address = signer_address);

        let payload = json!({
            "config": {
                "adminSigner": { "type": "external-wallet", "address": signer_address }
            },
            "type": "smart",
            "chainType": "evm",
        });
        let body = self.post(&format!("/api/{}/wallets", WALLET_API_VERSION), &payload)?;
        let handle = parse_wallet_response(&body)?;

        log_info!(MODULE, "wallet created", wallet_address = handle.address);
        Ok(handle)
    }

    fn fund_wallet(&self, wallet: &WalletHandle, amount: u64) -> ApiResult<()> {
        log_info!(MODULE, "funding wallet", wallet_locator = wallet.locator, amount = amount);

        let payload = json!({
            "amount": amount,
            "token": "usdxm",
            "chain": self.network,
        });
        self.post(&format!("/api/v1-alpha2/wallets/{}/balances", wallet.locator), &payload)?;
        Ok(())
    }

    fn create_transfer(
        &self,
        wallet: &WalletHandle,
        recipient: &str,
        amount: &str,
    ) -> ApiResult<CreatedTransfer> {
        log_info!(MODULE, "creating transfer", recipient = recipient, amount = amount);

        let payload = json!({ "recipient": recipient, "amount": amount });
        let path = format!(
            "/api/{}/wallets/{}/tokens/{}:usdxm/transfers",
            WALLET_API_VERSION, wallet.locator, self.network
        );
        let body = self.post(&path, &payload)?;
        parse_transfer_response(&body)
    }

    fn submit_approval(
        &self,
        wallet: &WalletHandle,
        transaction_id: &str,
        signer_locator: &str,
        signature: &str,
    ) -> ApiResult<()> {
        log_info!(
            MODULE,
            "submitting approval",
            tx_id = transaction_id,
            signer_locator = signer_locator,
        );

        let payload = json!({
            "approvals": [ { "signer": signer_locator, "signature": signature } ]
        });
        let path = format!(
            "/api/{}/wallets/{}/transactions/{}/approvals",
            WALLET_API_VERSION, wallet.locator, transaction_id
        );
        self.post(&path, &payload)?;
        Ok(())
    }

    fn fetch_transaction(
        &self,
        wallet: &WalletHandle,
        transaction_id: &str,
    ) -> ApiResult<TransactionRecord> {
        log_debug!(MODULE, "fetching transaction", tx_id = transaction_id);

        let path = format!(
            "/api/{}/wallets/{}/transactions/{}",
            WALLET_API_VERSION, wallet.locator, transaction_id
        );
        let body = self.get(&path)?;
        Ok(parse_transaction_record(&body, transaction_id))
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Extract the wallet handle, trying the locator fields the service has used
/// across API revisions and falling back to the wallet address itself
fn parse_wallet_response(body: &Value) -> ApiResult<WalletHandle> {
    let address = non_empty_str(&body["address"])
        .ok_or_else(|| ApiError::Malformed("wallet response missing address".into()))?
        .to_string();

    let locator = non_empty_str(&body["locator"])
        .or_else(|| non_empty_str(&body["id"]))
        .or_else(|| non_empty_str(&body["walletId"]))
        .unwrap_or(&address)
        .to_string();

    Ok(WalletHandle { locator, address })
}

/// Extract the transfer id and, when present, its first pending approval
fn parse_transfer_response(body: &Value) -> ApiResult<CreatedTransfer> {
    let id = non_empty_str(&body["id"])
        .ok_or_else(|| ApiError::Malformed("transfer response missing id".into()))?
        .to_string();

    let pending_approval = match body["approvals"]["pending"].as_array() {
        Some(entries) if !entries.is_empty() => {
            let entry = &entries[0];
            let message = non_empty_str(&entry["message"]).ok_or_else(|| {
                ApiError::Malformed("pending approval missing message hash".into())
            })?;
            let signer_locator = non_empty_str(&entry["signer"]["locator"]).ok_or_else(|| {
                ApiError::Malformed("pending approval missing signer locator".into())
            })?;
            Some(PendingApproval {
                message: message.to_string(),
                signer_locator: signer_locator.to_string(),
            })
        }
        _ => None,
    };

    Ok(CreatedTransfer { id, pending_approval })
}

/// Build a status snapshot from a transaction response.
///
/// The on-chain hash appears under `onChain.txId` on newer responses and
/// `txHash` on older ones.
fn parse_transaction_record(body: &Value, fallback_id: &str) -> TransactionRecord {
    let id = non_empty_str(&body["id"]).unwrap_or(fallback_id).to_string();
    let status = TxStatus::from(body["status"].as_str().unwrap_or("pending").to_string());
    let on_chain_hash = non_empty_str(&body["onChain"]["txId"])
        .or_else(|| non_empty_str(&body["txHash"]))
        .map(str::to_string);

    TransactionRecord { id, status, on_chain_hash }
}
