//! Key Generation
//!
//! Draws 32 random bytes from the OS RNG and rejects anything that is not a
//! valid secp256k1 scalar (zero or >= the curve order). Rejection sampling
//! keeps the distribution uniform over [1, n-1]; reducing mod n would not.
//!
//! SECURITY: intermediate key bytes are zeroized on drop.

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use crate::utils::crypto::{decode_fixed_hex, keccak256, to_checksum_address};

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("secure random source failed: {0}")]
    RandomSource(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// A secp256k1 key pair with its derived EVM address
pub struct EvmKeypair {
    secret: SecretKey,
    public: PublicKey,
    address: String,
}

impl EvmKeypair {
    /// Generate a fresh key pair from OS randomness
    pub fn generate() -> Result<Self, KeyError> {
        let mut rng = OsRng;
        loop {
            let mut candidate = Zeroizing::new([0u8; 32]);
            rng.try_fill_bytes(candidate.as_mut())
                .map_err(|e| KeyError::RandomSource(e.to_string()))?;

            // from_slice rejects zero and values >= the curve order; redraw
            // instead of reducing
            match SecretKey::from_slice(candidate.as_ref()) {
                Ok(secret) => return Ok(Self::from_secret(secret)),
                Err(_) => continue,
            }
        }
    }

    /// Build a key pair from raw secret bytes
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let secret = SecretKey::from_slice(bytes)
            .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_secret(secret))
    }

    /// Build a key pair from a hex-encoded secret (optional `0x` prefix)
    pub fn from_secret_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes: Zeroizing<[u8; 32]> = Zeroizing::new(
            decode_fixed_hex(hex_key).map_err(KeyError::InvalidPrivateKey)?,
        );
        Self::from_secret_bytes(&bytes)
    }

    fn from_secret(secret: SecretKey) -> Self {
        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &secret);
        let address = derive_address(&public);
        Self { secret, public, address }
    }

    /// The EIP-55 checksummed `0x` address for this key pair
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }
}

impl std::fmt::Debug for EvmKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret scalar through Debug output
        f.debug_struct("EvmKeypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Standard Ethereum address derivation: keccak256 of the uncompressed
/// public key (without the 0x04 tag), last 20 bytes
fn derive_address(public: &PublicKey) -> String {
    let uncompressed = public.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut account = [0u8; 20];
    account.copy_from_slice(&hash[12..]);
    to_checksum_address(&account)
}
