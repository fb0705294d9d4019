//! Message Signing
//!
//! Produces the recoverable secp256k1 signatures the wallet service accepts
//! as transaction approvals: EIP-191 personal-message signing over a 32-byte
//! hash, serialized as one fixed-width hex string.

pub mod ethereum;

pub use ethereum::{
    prefixed_digest, recover_address, sign_message_hash, sign_message_hash_hex,
    sign_prefixed_hash, verify_signature,
};

/// A 65-byte recoverable ECDSA signature split into its components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvmSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub v: u8,
}

impl EvmSignature {
    /// Serialize as `0x` + r (64 hex) + s (64 hex) + v (2 hex), 132 chars.
    ///
    /// r and s are fixed 32-byte arrays, so both halves are always left
    /// zero-padded to 64 hex digits regardless of their natural magnitude.
    pub fn to_hex(&self) -> String {
        format!("0x{}{}{:02x}", hex::encode(self.r), hex::encode(self.s), self.v)
    }

    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Parse a 65-byte signature back into components
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignError> {
        if bytes.len() != 65 {
            return Err(SignError::InvalidSignature(format!(
                "expected 65 bytes, got {}",
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("invalid message hash: {0}")]
    InvalidMessage(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("address recovery failed: {0}")]
    RecoveryFailed(String),
}

pub type SignResult<T> = Result<T, SignError>;
