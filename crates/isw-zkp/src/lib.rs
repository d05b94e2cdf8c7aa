#![deny(missing_docs)]

//! # isw-zkp — Membership Proof Verification
//!
//! Anonymous contributions are authorized by a zero-knowledge proof that
//! the donor belongs to a registered group. The group, the circuit and
//! the prover all live outside this system. This crate defines the seam:
//!
//! - [`MembershipProof`]: the packed eight-word proof.
//! - [`MembershipVerifier`]: the pure verification interface.
//! - [`MockMembershipVerifier`]: settable verdict for tests (`mock` feature).
//! - [`TranscriptVerifier`]: deterministic input-binding verifier for staging.
//!
//! Unlike a sealed proof-system abstraction, the verifier trait is open:
//! deployments plug in their own on-chain or native SNARK verifier.

#[cfg(feature = "mock")]
pub mod mock;
pub mod proof;
pub mod traits;
pub mod transcript;

#[cfg(feature = "mock")]
pub use mock::{MockMembershipVerifier, VerifierCall};
pub use proof::{MembershipProof, PROOF_POINTS};
pub use traits::{MembershipVerifier, VerifyError};
pub use transcript::TranscriptVerifier;
