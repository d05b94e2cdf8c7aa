#![deny(missing_docs)]

//! # isw-crypto — Signatures and Typed-Data Hashing
//!
//! Governance approvals in the custody core are secp256k1 signatures over
//! EIP-712 digests. This crate provides:
//!
//! - **Keccak-256** ([`keccak256`]) and address derivation.
//! - **Typed-data hashing** ([`Eip712Domain`], [`RecipientAction`]).
//! - **Signature handling** ([`SignatureBytes`]): 65-byte `r ‖ s ‖ v`
//!   with the low-s rule enforced.
//! - **Signer recovery** ([`SignerRecovery`], [`Secp256k1Recovery`]).
//! - **Local signing** ([`LocalSigner`]) for operators and tests.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - Secret keys never appear in logs or `Debug` output.

pub mod eip712;
pub mod error;
pub mod keccak;
pub mod recovery;
pub mod signature;
pub mod signer;

pub use eip712::{Eip712Domain, RecipientAction};
pub use error::CryptoError;
pub use keccak::{keccak256, keccak256_concat};
pub use recovery::{Secp256k1Recovery, SignerRecovery};
pub use signature::{order_signature_pair, SignatureBytes, SIGNATURE_LENGTH};
pub use signer::LocalSigner;
