//! # Cryptographic Error Types
//!
//! Structured errors for signature parsing, recovery, and key handling.

use thiserror::Error;

/// Errors from cryptographic operations in `isw-crypto`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Recoverable signatures are exactly 65 bytes (`r ‖ s ‖ v`).
    #[error("invalid signature length: expected 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// The `v` byte is not one of 0, 1, 27, 28.
    #[error("invalid recovery id v={0} (expected 27 or 28)")]
    InvalidRecoveryId(u8),

    /// `s` lies in the upper half of the curve order (malleable form).
    #[error("signature s-value is in the upper half of the curve order")]
    HighS,

    /// The signature does not recover to any public key.
    #[error("signer recovery failed: {0}")]
    RecoveryFailed(String),

    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// The signing backend refused to sign.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),
}
