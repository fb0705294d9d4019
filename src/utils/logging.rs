//! Structured Logging with Sensitive Data Redaction
//!
//! Every log line goes to stderr with a UTC timestamp, level, module tag and
//! optional key=value fields. Fields are redacted automatically: private keys
//! and API keys are hidden entirely, addresses and transaction hashes are
//! shortened to prefix...suffix.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable debug-level logging (disabled by default)
pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single structured log line under construction
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Attach a field, redacting it when the key looks sensitive
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let rendered = redact_field(key, &value.to_string());
        self.fields.push((key, rendered));
        self
    }

    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        if self.fields.is_empty() {
            eprintln!("[{}] {} [{}] {}", timestamp, self.level, self.module, self.message);
        } else {
            let fields = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            eprintln!(
                "[{}] {} [{}] {} | {}",
                timestamp, self.level, self.module, self.message, fields
            );
        }
    }
}

/// Keys whose values must never appear in logs
const SECRET_KEYS: &[&str] = &["private_key", "secret", "api_key", "key_hex", "scalar"];

/// Keys holding addresses or locators, shown as prefix...suffix
const ADDRESS_KEYS: &[&str] = &["address", "recipient", "signer", "wallet", "locator"];

/// Keys holding hashes or identifiers, shown as a longer prefix...suffix
const HASH_KEYS: &[&str] = &["hash", "txid", "tx_id", "message", "signature"];

fn redact_field(key: &str, value: &str) -> String {
    let key = key.to_ascii_lowercase();
    if SECRET_KEYS.iter().any(|k| key.contains(k)) {
        return hide(value);
    }
    if ADDRESS_KEYS.iter().any(|k| key.contains(k)) {
        return shorten(value, 8, 4);
    }
    if HASH_KEYS.iter().any(|k| key.contains(k)) {
        return shorten(value, 12, 6);
    }
    value.to_string()
}

fn hide(value: &str) -> String {
    if value.is_empty() {
        "[empty]".to_string()
    } else {
        format!("[redacted:{}chars]", value.len())
    }
}

fn shorten(value: &str, prefix: usize, suffix: usize) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "[empty]".to_string();
    }
    if value.len() <= prefix + suffix + 3 {
        return value.to_string();
    }
    format!("{}...{}", &value[..prefix], &value[value.len() - suffix..])
}

#[macro_export]
macro_rules! log_debug {
    ($module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}

#[macro_export]
macro_rules! log_info {
    ($module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Info, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}

#[macro_export]
macro_rules! log_warn {
    ($module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}

#[macro_export]
macro_rules! log_error {
    ($module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Error, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}
