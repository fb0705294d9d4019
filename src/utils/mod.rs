//! Shared utilities: hashing primitives and structured logging

pub mod crypto;
pub mod logging;
