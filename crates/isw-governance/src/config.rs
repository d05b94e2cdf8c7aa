//! # Registry Configuration
//!
//! Loaded from YAML or from `ISW_REGISTRY_*` environment variables:
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `ISW_REGISTRY_NAME` | no | `InnocentSupportWallet` |
//! | `ISW_REGISTRY_VERSION` | no | `1` |
//! | `ISW_REGISTRY_CHAIN_ID` | yes | |
//! | `ISW_REGISTRY_ADDRESS` | yes | |
//! | `ISW_REGISTRY_OWNERS` | yes, comma-separated | |
//! | `ISW_REGISTRY_TOKEN` | yes | |
//!
//! Loading only parses; semantic checks (two distinct non-zero owners and
//! so on) happen when the registry is constructed.

use std::path::Path;

use isw_core::config::{self, ConfigError};
use isw_core::Address;
use isw_crypto::Eip712Domain;
use serde::{Deserialize, Serialize};

/// Default EIP-712 domain name.
pub const DEFAULT_DOMAIN_NAME: &str = "InnocentSupportWallet";

/// Default EIP-712 domain version.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

fn default_name() -> String {
    DEFAULT_DOMAIN_NAME.to_string()
}

fn default_version() -> String {
    DEFAULT_DOMAIN_VERSION.to_string()
}

/// Construction parameters of a [`GovernanceRegistry`](crate::GovernanceRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// EIP-712 domain name.
    #[serde(default = "default_name")]
    pub name: String,
    /// EIP-712 domain version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Chain id bound into every approval.
    pub chain_id: u64,
    /// The registry's own account: custody holder and `verifyingContract`.
    pub address: Address,
    /// The two co-signing owners, in configured order.
    pub owners: Vec<Address>,
    /// The custody token.
    pub token_address: Address,
}

impl RegistryConfig {
    /// A config with the default domain name and version.
    pub fn new(
        chain_id: u64,
        address: Address,
        owners: Vec<Address>,
        token_address: Address,
    ) -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            chain_id,
            address,
            owners,
            token_address,
        }
    }

    /// The signing domain these settings define.
    pub fn domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.address,
        )
    }

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
            name: config::optional_var(&lookup, "ISW_REGISTRY_NAME", default_name())?,
            version: config::optional_var(&lookup, "ISW_REGISTRY_VERSION", default_version())?,
            chain_id: config::required_var(&lookup, "ISW_REGISTRY_CHAIN_ID")?,
            address: config::required_var(&lookup, "ISW_REGISTRY_ADDRESS")?,
            owners: config::required_list(&lookup, "ISW_REGISTRY_OWNERS")?,
            token_address: config::required_var(&lookup, "ISW_REGISTRY_TOKEN")?,
        })
    }
}
