//! Transaction Poller
//!
//! Drives a transaction toward a terminal status by repeatedly invoking an
//! injected fetch capability. The loop has two states: pending (keep asking)
//! and terminal (return immediately). Transport errors consume an attempt and
//! the loop continues; the attempt budget is the only abort condition.
//!
//! Exhausting the budget reports one of two distinct failures:
//! - `Timeout`: at least one fetch succeeded but the transaction never
//!   finalized (carries the last-seen status);
//! - `Exhausted`: the polling channel itself never produced a record.

use std::time::Duration;

use crate::api::ApiError;
use crate::log_info;
use crate::log_warn;
use crate::types::{TransactionRecord, TxStatus};

const MODULE: &str = "poller";

/// Poll cadence: fixed interval between attempts plus an attempt budget
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(5), max_attempts: 60 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(
        "transaction {id} did not reach a terminal state after {attempts} attempts \
         (last status: {last_status})"
    )]
    Timeout {
        id: String,
        attempts: u32,
        last_status: TxStatus,
    },

    #[error("polling channel for transaction {id} failed {attempts} times: {last_error}")]
    Exhausted {
        id: String,
        attempts: u32,
        last_error: String,
    },
}

/// Poll with a real blocking sleep between attempts
pub fn poll_until_terminal<F>(
    id: &str,
    fetch: F,
    cfg: &PollConfig,
) -> Result<TransactionRecord, PollError>
where
    F: FnMut(&str) -> Result<TransactionRecord, ApiError>,
{
    poll_with_delay(id, fetch, cfg, std::thread::sleep)
}

/// Poll with an injectable delay so tests run with zero real waiting while
/// keeping call-count semantics intact.
///
/// The delay runs between attempts only, never after the last one; a record
/// with a terminal status returns without any further wait.
pub fn poll_with_delay<F, D>(
    id: &str,
    mut fetch: F,
    cfg: &PollConfig,
    mut delay: D,
) -> Result<TransactionRecord, PollError>
where
    F: FnMut(&str) -> Result<TransactionRecord, ApiError>,
    D: FnMut(Duration),
{
    let mut last_status: Option<TxStatus> = None;
    let mut last_error: Option<String> = None;

    for attempt in 1..=cfg.max_attempts {
        match fetch(id) {
            Ok(record) => {
                log_info!(
                    MODULE,
                    "transaction status",
                    tx_id = id,
                    status = record.status,
                    attempt = format_args!("{}/{}", attempt, cfg.max_attempts),
                );
                if record.status.is_terminal() {
                    return Ok(record);
                }
                last_status = Some(record.status);
            }
            Err(err) => {
                log_warn!(
                    MODULE,
                    "status fetch failed",
                    tx_id = id,
                    attempt = format_args!("{}/{}", attempt, cfg.max_attempts),
                    error = err,
                );
                last_error = Some(err.to_string());
            }
        }

        if attempt < cfg.max_attempts {
            delay(cfg.interval);
        }
    }

    match last_status {
        Some(status) => Err(PollError::Timeout {
            id: id.to_string(),
            attempts: cfg.max_attempts,
            last_status: status,
        }),
        None => Err(PollError::Exhausted {
            id: id.to_string(),
            attempts: cfg.max_attempts,
            last_error: last_error.unwrap_or_else(|| "no attempts were made".to_string()),
        }),
    }
}
