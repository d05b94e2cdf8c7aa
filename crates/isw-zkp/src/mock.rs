//! # Mock Membership Verifier
//!
//! A verifier whose verdict is set by the test. It records every call so
//! tests can assert exactly which public inputs the ledger passed.
//!
//! ## Security Notice
//!
//! This verifier checks nothing. It exists for tests and local
//! development only and is gated behind the `mock` feature.

use isw_core::{FieldElement, GroupRoot, Nullifier};
use parking_lot::Mutex;

use crate::proof::MembershipProof;
use crate::traits::{MembershipVerifier, VerifyError};

/// One recorded `verify` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierCall {
    /// Group root passed in.
    pub group_root: GroupRoot,
    /// Nullifier passed in.
    pub nullifier: Nullifier,
    /// Proof passed in.
    pub proof: MembershipProof,
    /// Message (signal) passed in.
    pub message: FieldElement,
    /// Scope (external nullifier) passed in.
    pub scope: FieldElement,
}

/// Verifier with a settable verdict.
#[derive(Debug)]
pub struct MockMembershipVerifier {
    verdict: Mutex<Result<bool, VerifyError>>,
    calls: Mutex<Vec<VerifierCall>>,
}

impl MockMembershipVerifier {
    /// A mock that accepts every proof.
    pub fn accepting() -> Self {
        Self::with_verdict(Ok(true))
    }

    /// A mock that rejects every proof.
    pub fn rejecting() -> Self {
        Self::with_verdict(Ok(false))
    }

    /// A mock that returns `verdict` until changed.
    pub fn with_verdict(verdict: Result<bool, VerifyError>) -> Self {
        Self {
            verdict: Mutex::new(verdict),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set whether subsequent proofs verify.
    pub fn set_valid(&self, valid: bool) {
        *self.verdict.lock() = Ok(valid);
    }

    /// Make subsequent calls fail with `error`.
    pub fn fail_with(&self, error: VerifyError) {
        *self.verdict.lock() = Err(error);
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> Vec<VerifierCall> {
        self.calls.lock().clone()
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockMembershipVerifier {
    fn default() -> Self {
        Self::accepting()
    }
}

impl MembershipVerifier for MockMembershipVerifier {
    fn verify(
        &self,
        group_root: &GroupRoot,
        nullifier: &Nullifier,
        proof: &MembershipProof,
        message: &FieldElement,
        scope: &FieldElement,
    ) -> Result<bool, VerifyError> {
        self.calls.lock().push(VerifierCall {
            group_root: *group_root,
            nullifier: *nullifier,
            proof: *proof,
            message: *message,
            scope: *scope,
        });
        self.verdict.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(v: &MockMembershipVerifier) -> Result<bool, VerifyError> {
        v.verify(
            &GroupRoot::from_u128(1),
            &Nullifier::from_u128(2),
            &MembershipProof::from_seed(3),
            &FieldElement::from_u128(4),
            &FieldElement::from_u128(5),
        )
    }

    #[test]
    fn verdict_is_settable() {
        let v = MockMembershipVerifier::accepting();
        assert_eq!(call(&v), Ok(true));
        v.set_valid(false);
        assert_eq!(call(&v), Ok(false));
        v.fail_with(VerifyError::Unavailable("down".into()));
        assert_eq!(call(&v), Err(VerifyError::Unavailable("down".into())));
        assert_eq!(MockMembershipVerifier::rejecting().verify(
            &GroupRoot::ZERO,
            &Nullifier::ZERO,
            &MembershipProof::EMPTY,
            &FieldElement::ZERO,
            &FieldElement::ZERO,
        ), Ok(false));
    }

    #[test]
    fn records_public_inputs() {
        let v = MockMembershipVerifier::default();
        call(&v).unwrap();
        call(&v).unwrap();
        assert_eq!(v.call_count(), 2);
        let first = &v.calls()[0];
        assert_eq!(first.group_root, GroupRoot::from_u128(1));
        assert_eq!(first.nullifier, Nullifier::from_u128(2));
        assert_eq!(first.message, FieldElement::from_u128(4));
        assert_eq!(first.scope, FieldElement::from_u128(5));
    }
}
