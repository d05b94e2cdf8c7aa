#![deny(missing_docs)]

//! # isw-ledger — Anonymous Contribution Ledger
//!
//! [`ContributionLedger`] records donations authorized only by a
//! zero-knowledge membership proof. Each proof carries a nullifier, and a
//! nullifier can be spent once. Funds move straight from the donor to the
//! custody target (a governance registry) through the token's allowance
//! mechanism; the ledger itself never holds a balance.

pub mod config;
pub mod error;
pub mod ledger;
pub mod record;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use ledger::ContributionLedger;
pub use record::{ContributionRequest, DonationRecord};
