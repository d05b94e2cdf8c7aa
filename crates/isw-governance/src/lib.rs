#![deny(missing_docs)]

//! # isw-governance — Two-Owner Custody Registry
//!
//! [`GovernanceRegistry`] holds donated funds and a withdrawal whitelist.
//! Whitelist changes need EIP-712 approvals from both configured owners,
//! submitted in ascending signer order with a never-before-used nonce.
//! Whitelisted accounts withdraw freely; whitelist correctness is the sole
//! boundary on fund egress.
//!
//! ## Operations
//!
//! | Operation | Authorization | Event |
//! |---|---|---|
//! | [`add_recipient`](GovernanceRegistry::add_recipient) | both owners + fresh nonce | `RecipientAdded` |
//! | [`remove_recipient`](GovernanceRegistry::remove_recipient) | both owners + fresh nonce | `RecipientRemoved` |
//! | [`withdraw`](GovernanceRegistry::withdraw) | caller whitelisted | `WithdrawalExecuted` |

pub mod config;
pub mod error;
pub mod registry;

pub use config::{RegistryConfig, DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION};
pub use error::RegistryError;
pub use registry::{GovernanceRegistry, REQUIRED_SIGNATURES};
