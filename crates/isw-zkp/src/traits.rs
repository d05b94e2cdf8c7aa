//! # Membership Verifier Trait
//!
//! The ledger authorizes a contribution solely by a membership proof. The
//! circuit and the group itself live outside this system; the ledger only
//! asks a verifier whether `proof` shows that someone in the group rooted
//! at `group_root` produced `nullifier` for `(message, scope)`.
//!
//! ## Security Invariant
//!
//! Verification is pure: no side effects, same answer for the same inputs.
//! `Ok(false)` means "the proof is wrong"; `Err` means "could not decide".
//! Callers must not conflate the two.

use isw_core::{FieldElement, GroupRoot, Nullifier};
use thiserror::Error;

use crate::proof::MembershipProof;

/// The verifier could not reach a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The proof is structurally unusable (points off-curve, wrong encoding).
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The verifying key does not match the circuit the proof targets.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),
    /// The verifier backend is unavailable.
    #[error("verifier unavailable: {0}")]
    Unavailable(String),
}

/// A group-membership proof verifier.
pub trait MembershipVerifier: Send + Sync {
    /// Verify `proof` against the public inputs.
    ///
    /// `message` is the signal the proof commits to (the contribution
    /// amount) and `scope` is the external nullifier (the custody target).
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError`] only when no verdict can be reached.
    fn verify(
        &self,
        group_root: &GroupRoot,
        nullifier: &Nullifier,
        proof: &MembershipProof,
        message: &FieldElement,
        scope: &FieldElement,
    ) -> Result<bool, VerifyError>;
}
