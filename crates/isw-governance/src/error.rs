//! # Registry Errors
//!
//! Every rejection leaves registry state untouched. Variants map to stable
//! codes via [`RegistryError::code`] so integrators can branch without
//! parsing messages.

use isw_core::{Address, Amount, Nonce};
use isw_crypto::CryptoError;
use isw_token::TransferError;
use thiserror::Error;

/// Errors from [`GovernanceRegistry`](crate::GovernanceRegistry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Construction arguments are unusable. No registry is created.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong.
        reason: String,
    },

    /// Approvals need exactly two signatures.
    #[error("expected {expected} signatures, got {got}")]
    InvalidSignatureCount {
        /// Required count.
        expected: usize,
        /// Supplied count.
        got: usize,
    },

    /// The nonce has already been consumed by an add or a remove.
    #[error("nonce {nonce} has already been used")]
    NonceReused {
        /// The replayed nonce.
        nonce: Nonce,
    },

    /// A signature could not be recovered to any signer.
    #[error("signature {index} is malformed: {source}")]
    MalformedSignature {
        /// Position in the submitted array.
        index: usize,
        /// Why recovery failed.
        source: CryptoError,
    },

    /// A signature recovered to an address that is not an owner.
    #[error("signature {index} recovers to non-owner {signer}")]
    UnauthorizedSigner {
        /// Position in the submitted array.
        index: usize,
        /// The recovered address.
        signer: Address,
    },

    /// Both signatures came from the same owner.
    #[error("both signatures recover to owner {signer}")]
    DuplicateSigner {
        /// The owner who signed twice.
        signer: Address,
    },

    /// Signatures are not in ascending signer order.
    #[error("signatures out of order: {first} must be lower than {second}")]
    SignatureOrderInvalid {
        /// Signer of `signatures[0]`.
        first: Address,
        /// Signer of `signatures[1]`.
        second: Address,
    },

    /// The zero address cannot be whitelisted or removed.
    #[error("invalid recipient address")]
    InvalidRecipient,

    /// Only whitelisted accounts may withdraw.
    #[error("caller {caller} is not whitelisted")]
    CallerNotWhitelisted {
        /// The rejected caller.
        caller: Address,
    },

    /// Custody holds less than requested.
    #[error("insufficient custody balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Current custody balance.
        available: Amount,
        /// Requested withdrawal.
        requested: Amount,
    },

    /// The token refused the movement.
    #[error("token transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

impl RegistryError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::InvalidSignatureCount { .. } => "INVALID_SIGNATURE_COUNT",
            Self::NonceReused { .. } => "NONCE_REUSED",
            Self::MalformedSignature { .. } => "MALFORMED_SIGNATURE",
            Self::UnauthorizedSigner { .. } => "UNAUTHORIZED_SIGNER",
            Self::DuplicateSigner { .. } => "DUPLICATE_SIGNER",
            Self::SignatureOrderInvalid { .. } => "SIGNATURE_ORDER_INVALID",
            Self::InvalidRecipient => "INVALID_RECIPIENT",
            Self::CallerNotWhitelisted { .. } => "CALLER_NOT_WHITELISTED",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::Transfer(_) => "TRANSFER_FAILED",
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
