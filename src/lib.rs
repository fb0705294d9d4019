//! Custodial smart-wallet approval flow
//!
//! Automates a wallet-service transaction that requires an externally
//! generated signature as its approval:
//!
//! - **wallet**: secp256k1 key pair generation and EVM address derivation
//! - **signer**: EIP-191 personal-message signing over a 32-byte hash,
//!   serialized as the 132-character recoverable signature the service expects
//! - **poller**: bounded polling of transaction status until a terminal state
//! - **api**: the wallet-service seam (`WalletApi` trait + Crossmint client)
//! - **orchestrator**: end-to-end sequencing of one approval flow
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet_approver::{api::CrossmintClient, config::Config, orchestrator};
//!
//! let config = Config::from_env()?;
//! let client = CrossmintClient::new(&config.base_url, &config.api_key, &config.network)?;
//! let outcome = orchestrator::run(&client, &config.flow_config())?;
//! println!("final status: {}", outcome.final_status);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod poller;
pub mod signer;
pub mod types;
pub mod utils;
pub mod wallet;

pub use error::{FlowError, FlowResult};
pub use orchestrator::FlowConfig;
pub use poller::PollConfig;
pub use types::{FlowOutcome, TransactionRecord, TxStatus};
pub use wallet::EvmKeypair;
