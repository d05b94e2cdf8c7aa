//! # Ledger Errors

use isw_core::{Amount, Nullifier};
use isw_token::TransferError;
use isw_zkp::VerifyError;
use thiserror::Error;

/// Errors from [`ContributionLedger`](crate::ContributionLedger).
///
/// Every rejection leaves the ledger unchanged: no nullifier is consumed
/// and nothing is recorded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Construction arguments are unusable. No ledger is created.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong.
        reason: String,
    },

    /// The verifier rejected the membership proof.
    #[error("membership proof rejected for nullifier {nullifier}")]
    InvalidProof {
        /// Nullifier the proof claimed.
        nullifier: Nullifier,
    },

    /// The verifier could not reach a verdict.
    #[error("proof verifier failed: {0}")]
    Verifier(#[from] VerifyError),

    /// The nullifier was already spent by an earlier contribution.
    #[error("nullifier {nullifier} has already been used")]
    NullifierReused {
        /// The replayed nullifier.
        nullifier: Nullifier,
    },

    /// Accepting the contribution would overflow the ledger's running
    /// total. Checked before the token is called.
    #[error("total donated {total} cannot absorb {amount}")]
    TotalOverflow {
        /// Running total before this contribution.
        total: Amount,
        /// The rejected contribution.
        amount: Amount,
    },

    /// The token refused to move the donor's funds.
    #[error("token transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

impl LedgerError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::InvalidProof { .. } => "INVALID_PROOF",
            Self::Verifier(_) => "VERIFIER_FAILED",
            Self::NullifierReused { .. } => "NULLIFIER_REUSED",
            Self::TotalOverflow { .. } => "TOTAL_OVERFLOW",
            Self::Transfer(_) => "TRANSFER_FAILED",
        }
    }
}
