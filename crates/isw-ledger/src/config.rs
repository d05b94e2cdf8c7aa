//! # Ledger Configuration
//!
//! Loaded from YAML or from `ISW_LEDGER_*` environment variables
//! (`ISW_LEDGER_ADDRESS`, `ISW_LEDGER_VERIFIER`, `ISW_LEDGER_TOKEN`,
//! `ISW_LEDGER_CUSTODY_TARGET`, all required).

use std::path::Path;

use isw_core::config::{self, ConfigError};
use isw_core::Address;
use serde::{Deserialize, Serialize};

/// Construction parameters of a [`ContributionLedger`](crate::ContributionLedger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The ledger's own account; donors approve it as token spender.
    pub address: Address,
    /// Address of the membership-proof verifier.
    pub verifier_address: Address,
    /// The contribution token.
    pub token_address: Address,
    /// Default registry that integrators direct contributions to.
    pub custody_target: Address,
}

impl LedgerConfig {
    /// Parse from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        config::from_yaml_str(yaml)
    }

    /// Load from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        config::from_yaml_file(path)
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(config::process_env)
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            address: config::required_var(&lookup, "ISW_LEDGER_ADDRESS")?,
            verifier_address: config::required_var(&lookup, "ISW_LEDGER_VERIFIER")?,
            token_address: config::required_var(&lookup, "ISW_LEDGER_TOKEN")?,
            custody_target: config::required_var(&lookup, "ISW_LEDGER_CUSTODY_TARGET")?,
        })
    }
}
