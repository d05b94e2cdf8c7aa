//! # Keccak-256
//!
//! The pre-standard Keccak variant used by EIP-712 and Ethereum address
//! derivation (not FIPS SHA3-256; the padding differs).

use isw_core::Address;
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    hasher.finalize().into()
}

/// Keccak-256 over several slices, as if concatenated.
pub fn keccak256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Derive an account address from a 64-byte uncompressed public key
/// (x ‖ y, without the `0x04` SEC1 tag).
pub fn address_from_public_key(xy: &[u8; 64]) -> Address {
    let hash = keccak256(xy);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::from_bytes(bytes)
}
