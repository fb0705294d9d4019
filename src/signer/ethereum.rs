//! EIP-191 personal-message signing over a 32-byte hash
//!
//! The wallet service hands out a raw 32-byte message hash and verifies the
//! approval the way viem's `signMessage({ raw })` signs it: the hash is
//! wrapped in the "\x19Ethereum Signed Message:\n32" prefix and keccak-hashed
//! before ECDSA. Signing the hash directly, without the prefix, produces a
//! signature the verifier rejects.
//!
//! Nonces are deterministic (RFC 6979, via libsecp256k1), s is normalized to
//! the lower half of the curve order, and v is encoded as 27 + recovery_id —
//! the {27, 28} legacy convention the verifier expects.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use super::{EvmSignature, SignError, SignResult};
use crate::utils::crypto::{decode_fixed_hex, keccak256, to_checksum_address};

const ETH_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Compute the EIP-191 prefixed digest of a 32-byte message hash
pub fn prefixed_digest(message_hash: &[u8; 32]) -> [u8; 32] {
    let prefix = format!("{}{}", ETH_MESSAGE_PREFIX, message_hash.len());
    let mut data = Vec::with_capacity(prefix.len() + message_hash.len());
    data.extend_from_slice(prefix.as_bytes());
    data.extend_from_slice(message_hash);
    keccak256(&data)
}

/// Sign a 32-byte message hash with the EIP-191 prefix applied.
///
/// Pure function of its inputs: RFC 6979 nonces make the signature
/// deterministic for a given (hash, key) pair.
pub fn sign_prefixed_hash(message_hash: &[u8; 32], secret: &SecretKey) -> EvmSignature {
    let secp = Secp256k1::new();
    let digest = prefixed_digest(message_hash);
    let msg = Message::from_digest(digest);

    let sig = secp.sign_ecdsa_recoverable(&msg, secret);
    let (recovery_id, compact) = sig.serialize_compact();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&compact[..32]);
    s.copy_from_slice(&compact[32..]);

    // libsecp always emits low-s; v = 27 + recovery_id
    EvmSignature { r, s, v: 27 + recovery_id.to_i32() as u8 }
}

/// Sign a hex-encoded 32-byte message hash (optional `0x` prefix)
pub fn sign_message_hash(message_hex: &str, secret: &SecretKey) -> SignResult<EvmSignature> {
    let hash: [u8; 32] = decode_fixed_hex(message_hex).map_err(SignError::InvalidMessage)?;
    Ok(sign_prefixed_hash(&hash, secret))
}

/// Sign with both the message hash and the private key as hex strings.
///
/// This is the wire-level entry point: both inputs arrive exactly as the
/// remote service and the caller supply them.
pub fn sign_message_hash_hex(message_hex: &str, private_key_hex: &str) -> SignResult<EvmSignature> {
    let key_bytes: [u8; 32] =
        decode_fixed_hex(private_key_hex).map_err(SignError::InvalidPrivateKey)?;
    let secret =
        SecretKey::from_slice(&key_bytes).map_err(|e| SignError::InvalidPrivateKey(e.to_string()))?;
    sign_message_hash(message_hex, &secret)
}

/// Recover the checksummed signer address from a message hash and signature
pub fn recover_address(message_hash: &[u8; 32], signature: &EvmSignature) -> SignResult<String> {
    let recovery_id = match signature.v {
        27 | 28 => signature.v - 27,
        0 | 1 => signature.v,
        other => {
            return Err(SignError::InvalidSignature(format!(
                "unsupported recovery value: {}",
                other
            )))
        }
    };

    let secp = Secp256k1::new();
    let digest = prefixed_digest(message_hash);
    let msg = Message::from_digest(digest);

    let rec_id = RecoveryId::from_i32(recovery_id as i32)
        .map_err(|e| SignError::InvalidSignature(e.to_string()))?;
    let bytes = signature.to_bytes();
    let recoverable = RecoverableSignature::from_compact(&bytes[..64], rec_id)
        .map_err(|e| SignError::InvalidSignature(e.to_string()))?;

    let public = secp
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|e| SignError::RecoveryFailed(e.to_string()))?;

    Ok(address_of(&public))
}

/// Check that a signature over a message hash recovers to the given address
pub fn verify_signature(
    message_hash: &[u8; 32],
    signature: &EvmSignature,
    address: &str,
) -> SignResult<bool> {
    let recovered = recover_address(message_hash, signature)?;
    Ok(recovered.eq_ignore_ascii_case(address))
}

fn address_of(public: &PublicKey) -> String {
    let uncompressed = public.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut account = [0u8; 20];
    account.copy_from_slice(&hash[12..]);
    to_checksum_address(&account)
}
