//! Wallet Service API
//!
//! The seam between the core flow and the remote custodial-wallet service.
//! The orchestrator only sees the `WalletApi` trait; `CrossmintClient` is the
//! HTTP implementation. Every operation is a fallible remote call.

mod crossmint;

pub use crossmint::CrossmintClient;

use crate::types::{CreatedTransfer, TransactionRecord, WalletHandle};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Abstract capabilities the core consumes from the wallet service
pub trait WalletApi {
    /// Create a smart wallet whose admin signer is the given external address
    fn create_wallet(&self, signer_address: &str) -> ApiResult<WalletHandle>;

    /// Top up the wallet with test tokens
    fn fund_wallet(&self, wallet: &WalletHandle, amount: u64) -> ApiResult<()>;

    /// Create a token transfer; the response carries the approval message
    /// hash that must be signed before the transfer executes
    fn create_transfer(
        &self,
        wallet: &WalletHandle,
        recipient: &str,
        amount: &str,
    ) -> ApiResult<CreatedTransfer>;

    /// Submit the 132-character hex signature approving a transaction
    fn submit_approval(
        &self,
        wallet: &WalletHandle,
        transaction_id: &str,
        signer_locator: &str,
        signature: &str,
    ) -> ApiResult<()>;

    /// Fetch the current snapshot of a transaction
    fn fetch_transaction(
        &self,
        wallet: &WalletHandle,
        transaction_id: &str,
    ) -> ApiResult<TransactionRecord>;
}
