//! Environment-driven configuration for the demo binary
//!
//! The core modules never read the environment; everything they need arrives
//! as plain parameters. This module is the single place that translates
//! environment variables into those parameters.

use std::env;
use std::time::Duration;

use url::Url;

use crate::orchestrator::FlowConfig;
use crate::poller::PollConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub network: String,
    pub recipient: String,
    pub amount: String,
    pub fund_amount: u64,
    pub poll_interval: Duration,
    pub poll_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = required("CROSSMINT_API_KEY")?;
        let base_url = optional("CROSSMINT_BASE_URL")
            .unwrap_or_else(|| "https://staging.crossmint.com".to_string());
        Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            name: "CROSSMINT_BASE_URL",
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_key,
            base_url,
            network: optional("NETWORK").unwrap_or_else(|| "base-sepolia".to_string()),
            recipient: optional("DEMO_RECIPIENT_ADDRESS")
                .unwrap_or_else(|| "0x6671f7552df0fbAF762Bd40aEd1cA3ec670d6161".to_string()),
            amount: optional("DEMO_AMOUNT_USDXM").unwrap_or_else(|| "1".to_string()),
            fund_amount: parsed("FUND_AMOUNT", 10)?,
            poll_interval: Duration::from_millis(parsed("POLL_INTERVAL_MS", 5_000)?),
            poll_max_attempts: parsed("POLL_MAX_ATTEMPTS", 60)?,
        })
    }

    /// The subset of configuration the orchestrator consumes
    pub fn flow_config(&self) -> FlowConfig {
        FlowConfig {
            recipient: self.recipient.clone(),
            amount: self.amount.clone(),
            fund_amount: Some(self.fund_amount),
            poll: PollConfig {
                interval: self.poll_interval,
                max_attempts: self.poll_max_attempts,
            },
        }
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match optional(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
