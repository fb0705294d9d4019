//! Shared cryptographic primitives
//!
//! Keccak-256 hashing, EIP-55 checksum addresses, and fixed-width hex
//! decoding used by both key generation and message signing.

use tiny_keccak::{Hasher, Keccak};

/// Compute the Keccak-256 digest of arbitrary bytes
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Render a 20-byte account as an EIP-55 checksummed `0x` address
pub fn to_checksum_address(account: &[u8; 20]) -> String {
    let lower = hex::encode(account);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if ch.is_ascii_digit() || nibble < 8 {
            out.push(ch);
        } else {
            out.push(ch.to_ascii_uppercase());
        }
    }
    out
}

/// Strip an optional `0x`/`0X` prefix from a hex string
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Decode a hex string (optional `0x` prefix) into exactly `N` bytes
pub fn decode_fixed_hex<const N: usize>(input: &str) -> Result<[u8; N], String> {
    let raw = hex::decode(strip_hex_prefix(input))
        .map_err(|e| format!("invalid hex: {}", e))?;
    if raw.len() != N {
        return Err(format!("expected {} bytes, got {}", N, raw.len()));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&raw);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak256_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn checksum_known_addresses() {
        let mut account = [0u8; 20];
        account.copy_from_slice(&hex::decode("f39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap());
        assert_eq!(
            to_checksum_address(&account),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );

        assert_eq!(
            to_checksum_address(&[0u8; 20]),
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn strip_prefix_variants() {
        assert_eq!(strip_hex_prefix("0xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("0Xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("abcd"), "abcd");
    }

    #[test]
    fn decode_fixed_length_enforced() {
        let ok: [u8; 2] = decode_fixed_hex("0xbeef").unwrap();
        assert_eq!(ok, [0xbe, 0xef]);

        assert!(decode_fixed_hex::<32>("0xbeef").is_err());
        assert!(decode_fixed_hex::<2>("zz").is_err());
    }
}
