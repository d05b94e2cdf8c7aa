//! # Account Addresses
//!
//! [`Address`] is the 20-byte account identifier shared by owners,
//! recipients, donors, the registry itself, and the token ledger.
//!
//! ## Ordering
//!
//! Addresses order byte-wise, which is identical to numeric `uint160`
//! ordering. The signature-pair canonical order depends on this.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::hex;

/// A 20-byte account address.
///
/// Serializes as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The zero address. Never a valid owner, recipient, or custody target.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw address bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build the address whose last byte is `n` and all others zero.
    /// Handy for fixtures and doc examples.
    pub const fn from_low_u64(n: u64) -> Self {
        let be = n.to_be_bytes();
        let mut bytes = [0u8; 20];
        let mut i = 0;
        while i < 8 {
            bytes[12 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Parse a hex address, with or without `0x`, case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] unless the input is
    /// exactly 40 hex characters after the optional prefix.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        hex::decode_fixed::<20>(value.trim(), false)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidAddress(value.to_string()))
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
