//! # uint256 Field Elements
//!
//! Proof public inputs travel as 32-byte big-endian `uint256` values.
//! [`Nullifier`] and [`GroupRoot`] are distinct newtypes over
//! [`FieldElement`] so a root can never be passed where a nullifier is
//! expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::hex;
use crate::identity::Address;

/// A 32-byte big-endian unsigned integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldElement([u8; 32]);

impl FieldElement {
    /// The zero element.
    pub const ZERO: FieldElement = FieldElement([0u8; 32]);

    /// Wrap raw big-endian bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Left-pad a `u128` into a `uint256`.
    pub const fn from_u128(n: u128) -> Self {
        let be = n.to_be_bytes();
        let mut bytes = [0u8; 32];
        let mut i = 0;
        while i < 16 {
            bytes[16 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Parse a hex value (`0x` optional, up to 64 digits, left-padded).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFieldElement`] on empty,
    /// non-hex, or over-long input.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        hex::decode_fixed::<32>(value.trim(), true)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidFieldElement(value.to_string()))
    }

    /// Access the big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The `0x`-prefixed, full-width lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }
}

impl From<u128> for FieldElement {
    fn from(n: u128) -> Self {
        Self::from_u128(n)
    }
}

impl From<Amount> for FieldElement {
    fn from(amount: Amount) -> Self {
        Self::from_u128(amount.as_u128())
    }
}

/// An address as a `uint256` scope value: 12 zero bytes then the address.
impl From<Address> for FieldElement {
    fn from(address: Address) -> Self {
        let mut bytes = [0u8; 32];
        bytes[12..].copy_from_slice(address.as_bytes());
        Self(bytes)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

impl FromStr for FieldElement {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

macro_rules! field_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(FieldElement);

        impl $name {
            /// The zero value, used as the "absent" sentinel.
            pub const ZERO: $name = $name(FieldElement::ZERO);

            /// Wrap a field element.
            pub const fn new(value: FieldElement) -> Self {
                Self(value)
            }

            /// Left-pad a small integer. Mostly for fixtures.
            pub const fn from_u128(n: u128) -> Self {
                Self(FieldElement::from_u128(n))
            }

            /// Parse from hex.
            ///
            /// # Errors
            ///
            /// See [`FieldElement::from_hex`].
            pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
                FieldElement::from_hex(value).map(Self)
            }

            /// The underlying field element.
            pub fn as_field(&self) -> &FieldElement {
                &self.0
            }

            /// Whether this is the zero sentinel.
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Full-width hex.
            pub fn to_hex(&self) -> String {
                self.0.to_hex()
            }
        }

        impl From<FieldElement> for $name {
            fn from(value: FieldElement) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0.to_hex())
            }
        }
    };
}

field_newtype!(
    /// The pseudonymous replay tag a membership proof commits to.
    ///
    /// Derived outside this system from the donor's secret and the scope
    /// (custody target), so the same donor reusing the same scope
    /// reproduces the same nullifier.
    Nullifier
);

field_newtype!(
    /// Merkle root of the membership group at proof-generation time.
    GroupRoot
);
