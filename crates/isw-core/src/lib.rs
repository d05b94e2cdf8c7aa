#![deny(missing_docs)]

//! # isw-core — Foundational Types for the Donation Custody Core
//!
//! Every other crate in the workspace depends on `isw-core`; it depends on
//! nothing internal.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** An [`Address`] is not a
//!    [`FieldElement`], a [`Nullifier`] is not a [`GroupRoot`], an
//!    [`Amount`] is not a [`Nonce`].
//!
//! 2. **Zero is a sentinel.** [`Address::ZERO`], [`Nullifier::ZERO`],
//!    [`Amount::ZERO`] and [`Timestamp::ZERO`] mark "absent"; constructors
//!    downstream reject them where a real value is required.
//!
//! 3. **Append-only audit.** [`EventLog`] never drops or rewrites entries.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod amount;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod hex;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use amount::{Amount, Nonce, TOKEN_DECIMALS};
pub use config::ConfigError;
pub use error::ValidationError;
pub use event::{AuditEvent, EventLog};
pub use field::{FieldElement, GroupRoot, Nullifier};
pub use identity::Address;
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
