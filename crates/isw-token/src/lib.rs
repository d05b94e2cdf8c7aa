#![deny(missing_docs)]

//! # isw-token — Token Collaborator
//!
//! Custody funds are balances in an external fungible token. The registry
//! and the contribution ledger talk to it only through [`TokenLedger`],
//! and they hold their own lock while calling it; implementations must
//! not call back into either component.
//!
//! [`InMemoryToken`] is a complete ERC-20 style implementation for tests,
//! local development, and single-process deployments.

pub mod error;
pub mod ledger;
pub mod memory;

pub use error::TransferError;
pub use ledger::TokenLedger;
pub use memory::InMemoryToken;
