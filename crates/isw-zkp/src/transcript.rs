//! # Transcript Verifier
//!
//! A deterministic, non-zero-knowledge stand-in for a SNARK verifier. A
//! proof is accepted when its first point equals
//!
//! ```text
//! SHA-256(group_root ‖ nullifier ‖ message ‖ scope)
//! ```
//!
//! and the group root is one the verifier has been told about. Changing
//! any public input invalidates the proof, which is the binding property
//! the ledger relies on; membership itself is not proven.
//!
//! ## Security Notice
//!
//! Anyone can compute a valid transcript. Use only for staging
//! deployments and integration tests.

use std::collections::BTreeSet;

use isw_core::{FieldElement, GroupRoot, Nullifier};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::proof::{MembershipProof, PROOF_POINTS};
use crate::traits::{MembershipVerifier, VerifyError};

/// Accepts transcript-bound proofs for a set of known group roots.
#[derive(Debug, Default)]
pub struct TranscriptVerifier {
    roots: RwLock<BTreeSet<GroupRoot>>,
}

impl TranscriptVerifier {
    /// A verifier that knows `roots`.
    pub fn new(roots: impl IntoIterator<Item = GroupRoot>) -> Self {
        Self {
            roots: RwLock::new(roots.into_iter().collect()),
        }
    }

    /// Accept proofs against `root` from now on.
    pub fn add_root(&self, root: GroupRoot) {
        self.roots.write().insert(root);
    }

    /// Whether `root` is known.
    pub fn knows_root(&self, root: &GroupRoot) -> bool {
        self.roots.read().contains(root)
    }

    /// The binding hash of the public inputs.
    pub fn transcript(
        group_root: &GroupRoot,
        nullifier: &Nullifier,
        message: &FieldElement,
        scope: &FieldElement,
    ) -> FieldElement {
        let mut hasher = Sha256::new();
        hasher.update(group_root.as_field().as_bytes());
        hasher.update(nullifier.as_field().as_bytes());
        hasher.update(message.as_bytes());
        hasher.update(scope.as_bytes());
        FieldElement::from_bytes(hasher.finalize().into())
    }

    /// Produce a proof this verifier accepts for the given inputs.
    pub fn prove(
        group_root: &GroupRoot,
        nullifier: &Nullifier,
        message: &FieldElement,
        scope: &FieldElement,
    ) -> MembershipProof {
        let mut points = [FieldElement::ZERO; PROOF_POINTS];
        points[0] = Self::transcript(group_root, nullifier, message, scope);
        MembershipProof::new(points)
    }
}

impl MembershipVerifier for TranscriptVerifier {
    fn verify(
        &self,
        group_root: &GroupRoot,
        nullifier: &Nullifier,
        proof: &MembershipProof,
        message: &FieldElement,
        scope: &FieldElement,
    ) -> Result<bool, VerifyError> {
        if proof.is_empty() {
            return Err(VerifyError::MalformedProof("all proof points are zero".into()));
        }
        if !self.knows_root(group_root) {
            return Ok(false);
        }
        Ok(proof.points[0] == Self::transcript(group_root, nullifier, message, scope))
    }
}
