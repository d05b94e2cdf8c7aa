//! # EIP-712 Typed-Data Hashing
//!
//! Governance approvals are signatures over an EIP-712 digest:
//!
//! ```text
//! digest = keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)
//! ```
//!
//! The domain binds a signature to one registry instance (name, version,
//! chain id, registry address). The struct hash binds it to one action,
//! one recipient and one nonce.
//!
//! ## Security Invariant
//!
//! `AddRecipient` and `RemoveRecipient` have distinct type hashes, so an
//! approval for one can never authorize the other, even with identical
//! recipient and nonce.

use isw_core::{Address, Nonce};
use serde::{Deserialize, Serialize};

use crate::keccak::{keccak256, keccak256_concat};

/// Canonical EIP-712 domain type string.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Type string for whitelist additions.
pub const ADD_RECIPIENT_TYPE: &str = "AddRecipient(address recipient,uint256 nonce)";

/// Type string for whitelist removals.
pub const REMOVE_RECIPIENT_TYPE: &str = "RemoveRecipient(address recipient,uint256 nonce)";

/// Left-pad an address into a 32-byte ABI word.
pub fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encode a `u64` as a 32-byte big-endian ABI word.
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// The EIP-712 signing domain of one registry instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    /// Human-readable signing domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain id the registry lives on.
    pub chain_id: u64,
    /// The registry's own address.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Construct a domain.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// `keccak256(DOMAIN_TYPE)`.
    pub fn type_hash() -> [u8; 32] {
        keccak256(DOMAIN_TYPE)
    }

    /// The domain separator.
    pub fn separator(&self) -> [u8; 32] {
        keccak256_concat(&[
            &Self::type_hash(),
            &keccak256(self.name.as_bytes()),
            &keccak256(self.version.as_bytes()),
            &u64_word(self.chain_id),
            &address_word(&self.verifying_contract),
        ])
    }

    /// The final signing digest for a struct hash under this domain.
    pub fn digest(&self, struct_hash: &[u8; 32]) -> [u8; 32] {
        Self::digest_with_separator(&self.separator(), struct_hash)
    }

    /// [`digest`](Self::digest) for callers that cached the separator.
    pub fn digest_with_separator(separator: &[u8; 32], struct_hash: &[u8; 32]) -> [u8; 32] {
        keccak256_concat(&[&[0x19, 0x01], separator, struct_hash])
    }
}

/// Which whitelist mutation an approval authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientAction {
    /// `AddRecipient(address recipient,uint256 nonce)`.
    Add,
    /// `RemoveRecipient(address recipient,uint256 nonce)`.
    Remove,
}

impl RecipientAction {
    /// The EIP-712 type string.
    pub fn type_string(&self) -> &'static str {
        match self {
            Self::Add => ADD_RECIPIENT_TYPE,
            Self::Remove => REMOVE_RECIPIENT_TYPE,
        }
    }

    /// `keccak256` of the type string.
    pub fn type_hash(&self) -> [u8; 32] {
        keccak256(self.type_string())
    }

    /// `keccak256(typeHash ‖ recipient ‖ nonce)`.
    pub fn struct_hash(&self, recipient: &Address, nonce: Nonce) -> [u8; 32] {
        keccak256_concat(&[
            &self.type_hash(),
            &address_word(recipient),
            &nonce.to_be_word(),
        ])
    }

    /// Full signing digest for this action under `domain`.
    pub fn digest(&self, domain: &Eip712Domain, recipient: &Address, nonce: Nonce) -> [u8; 32] {
        domain.digest(&self.struct_hash(recipient, nonce))
    }
}

impl std::fmt::Display for RecipientAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => f.write_str("AddRecipient"),
            Self::Remove => f.write_str("RemoveRecipient"),
        }
    }
}
