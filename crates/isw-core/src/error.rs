//! # Validation Errors
//!
//! Structured errors for the domain-primitive newtypes, built with `thiserror`.
//! Each variant carries the rejected input and the expected format so that
//! operators can diagnose misconfiguration without guesswork.

use thiserror::Error;

/// Validation errors raised while parsing or constructing domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Address is not 20 bytes of hex.
    #[error("invalid address: \"{0}\" (expected 0x followed by 40 hex characters)")]
    InvalidAddress(String),

    /// Field element is not 32 bytes of hex.
    #[error("invalid field element: \"{0}\" (expected 0x followed by up to 64 hex characters)")]
    InvalidFieldElement(String),

    /// Decimal token amount could not be parsed.
    #[error("invalid amount: \"{value}\" ({reason})")]
    InvalidAmount {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Nonce string is not a decimal or 0x-prefixed integer.
    #[error("invalid nonce: \"{0}\"")]
    InvalidNonce(String),
}
