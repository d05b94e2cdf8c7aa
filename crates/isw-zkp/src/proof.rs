//! # Membership Proof
//!
//! A Groth16 membership proof as it crosses the wire: eight `uint256`
//! values (`a.x, a.y, b.x0, b.x1, b.y0, b.y1, c.x, c.y`). This crate never
//! interprets the points; verifiers do.

use isw_core::FieldElement;
use serde::{Deserialize, Serialize};

/// Number of field elements in a packed proof.
pub const PROOF_POINTS: usize = 8;

/// A packed membership proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MembershipProof {
    /// The packed proof points.
    pub points: [FieldElement; PROOF_POINTS],
}

impl MembershipProof {
    /// A proof of all zeros. Never valid under a real verifier.
    pub const EMPTY: MembershipProof = MembershipProof {
        points: [FieldElement::ZERO; PROOF_POINTS],
    };

    /// Wrap packed points.
    pub const fn new(points: [FieldElement; PROOF_POINTS]) -> Self {
        Self { points }
    }

    /// Fixture helper: points `seed, seed + 1, ..., seed + 7`.
    pub fn from_seed(seed: u128) -> Self {
        let mut points = [FieldElement::ZERO; PROOF_POINTS];
        for (i, p) in points.iter_mut().enumerate() {
            *p = FieldElement::from_u128(seed.wrapping_add(i as u128));
        }
        Self { points }
    }

    /// Whether every point is zero.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(FieldElement::is_zero)
    }
}
