//! # Contribution Records
//!
//! [`ContributionRequest`] is what a donor submits; [`DonationRecord`] is
//! what the ledger keeps once the contribution commits. Records are keyed
//! by nullifier and never modified after insertion.

use isw_core::{Address, Amount, GroupRoot, Nullifier, Timestamp};
use isw_zkp::MembershipProof;
use serde::{Deserialize, Serialize};

/// An anonymous contribution, as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRequest {
    /// Root of the membership group the proof is against.
    pub group_root: GroupRoot,
    /// One-time tag derived from the donor's secret and the scope.
    pub nullifier: Nullifier,
    /// The packed membership proof.
    pub proof: MembershipProof,
    /// Registry that receives the funds; also the proof's scope.
    pub custody_target: Address,
    /// Contribution size; also the proof's message.
    pub amount: Amount,
}

/// A committed contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// The nullifier that was spent.
    pub nullifier: Nullifier,
    /// Amount moved into custody.
    pub amount: Amount,
    /// Registry that received it.
    pub custody_target: Address,
    /// Commit time.
    pub timestamp: Timestamp,
}

impl DonationRecord {
    /// The all-zero record returned for unknown nullifiers.
    pub const EMPTY: DonationRecord = DonationRecord {
        nullifier: Nullifier::ZERO,
        amount: Amount::ZERO,
        custody_target: Address::ZERO,
        timestamp: Timestamp::ZERO,
    };

    /// Whether this is the [`EMPTY`](Self::EMPTY) sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for DonationRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sentinel() {
        assert!(DonationRecord::EMPTY.is_empty());
        assert!(DonationRecord::default().is_empty());
        let real = DonationRecord {
            nullifier: Nullifier::from_u128(1),
            amount: Amount::new(1),
            custody_target: Address::from_low_u64(1),
            timestamp: Timestamp::from_unix(1),
        };
        assert!(!real.is_empty());
    }

    #[test]
    fn request_deserializes_from_json() {
        let json = serde_json::json!({
            "group_root": "0x1111",
            "nullifier": "0x3039",
            "proof": { "points": ["0x1", "0x2", "0x3", "0x4", "0x5", "0x6", "0x7", "0x8"] },
            "custody_target": "0x0000000000000000000000000000000000000abc",
            "amount": "1000000000000000000000"
        });
        let req: ContributionRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.nullifier, Nullifier::from_u128(12345));
        assert_eq!(req.amount, Amount::from_tokens(1000));
        assert_eq!(req.proof, isw_zkp::MembershipProof::from_seed(1));
    }
}
