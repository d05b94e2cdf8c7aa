//! # Recoverable Signatures
//!
//! Approvals travel as raw 65-byte `r ‖ s ‖ v` blobs. [`SignatureBytes`]
//! holds whatever the caller submitted; structural checks happen in
//! [`SignatureBytes::parse`] so that a malformed approval is reported at
//! the same validation step as an unauthorized one.
//!
//! ## Security Invariant
//!
//! Only low-s signatures are accepted. For every valid `(r, s)` the pair
//! `(r, n - s)` also verifies; rejecting the upper half removes that
//! second encoding.

use std::fmt;

use isw_core::{hex, Address};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CryptoError;

/// Length of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// `(n - 1) / 2` for the secp256k1 group order `n`.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// A submitted signature, not yet validated.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SignatureBytes(Vec<u8>);

/// A structurally valid signature: 64 bytes of `r ‖ s` and a normalized
/// recovery id in `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSignature {
    /// `r ‖ s`, big-endian.
    pub rs: [u8; 64],
    /// Recovery id, 0 or 1.
    pub recovery_id: u8,
}

impl SignatureBytes {
    /// Wrap raw bytes without validation.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode `0x`-prefixed or bare hex without validating the length.
    pub fn from_hex(value: &str) -> Result<Self, CryptoError> {
        hex::decode_vec(value.trim())
            .map(Self)
            .ok_or_else(|| CryptoError::HexDecode(format!("not valid hex: {value}")))
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase `0x` hex.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }

    /// Validate length, `v`, and the low-s rule.
    pub fn parse(&self) -> Result<ParsedSignature, CryptoError> {
        if self.0.len() != SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidSignatureLength(self.0.len()));
        }
        let v = self.0[64];
        let recovery_id = match v {
            27 | 28 => v - 27,
            0 | 1 => v,
            other => return Err(CryptoError::InvalidRecoveryId(other)),
        };
        let mut rs = [0u8; 64];
        rs.copy_from_slice(&self.0[..64]);
        if rs[32..] > SECP256K1_HALF_ORDER[..] {
            return Err(CryptoError::HighS);
        }
        Ok(ParsedSignature { rs, recovery_id })
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureBytes({})", self.to_hex())
    }
}

impl From<Vec<u8>> for SignatureBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Arrange two owner approvals in strictly ascending signer order.
///
/// The registry requires `signer(sig[0]) < signer(sig[1])`; callers that
/// collect approvals in arbitrary order use this to submit them correctly.
pub fn order_signature_pair(
    first: (Address, SignatureBytes),
    second: (Address, SignatureBytes),
) -> [SignatureBytes; 2] {
    if first.0 <= second.0 {
        [first.1, second.1]
    } else {
        [second.1, first.1]
    }
}
