//! # Token Amounts and Governance Nonces
//!
//! [`Amount`] counts token base units. The reference token carries 18
//! decimals, so `1 token == 10^18` base units. Arithmetic is checked; an
//! overflow is an error, never a wrap.
//!
//! [`Nonce`] is the caller-chosen replay tag for governance operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Decimals of the reference custody token.
pub const TOKEN_DECIMALS: u32 = 18;

/// An unsigned token amount in base units.
///
/// Serializes as a decimal string; 18-decimal values overflow JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(u128);

impl Amount {
    /// Zero base units.
    pub const ZERO: Amount = Amount(0);
    /// The largest representable amount; also the "unlimited allowance" marker.
    pub const MAX: Amount = Amount(u128::MAX);

    /// Wrap a base-unit count.
    pub const fn new(base_units: u128) -> Self {
        Self(base_units)
    }

    /// The base-unit count.
    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Whether the amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `self + rhs`, or `None` on overflow.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// `self - rhs`, or `None` if `rhs > self`.
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Parse a decimal token string into base units.
    ///
    /// `parse_units("100", 18)` is `100 * 10^18`; `parse_units("0.5", 2)`
    /// is `50`. At most `decimals` fractional digits are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAmount`] for empty input,
    /// non-digit characters, too many fractional digits, or overflow.
    pub fn parse_units(value: &str, decimals: u32) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = value.trim();
        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("empty"));
        }
        if frac.contains('.') {
            return Err(invalid("more than one decimal point"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("non-digit character"));
        }
        if frac.len() > decimals as usize {
            return Err(invalid("too many fractional digits"));
        }

        let scale = 10u128
            .checked_pow(decimals)
            .ok_or_else(|| invalid("decimals too large"))?;
        let whole_units = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .map_err(|_| invalid("overflow"))?
        };
        let frac_units = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = decimals as usize);
            padded.parse::<u128>().map_err(|_| invalid("overflow"))?
        };

        whole_units
            .checked_mul(scale)
            .and_then(|w| w.checked_add(frac_units))
            .map(Amount)
            .ok_or_else(|| invalid("overflow"))
    }

    /// Whole tokens at [`TOKEN_DECIMALS`]. Saturates at [`Amount::MAX`].
    pub fn from_tokens(whole: u64) -> Self {
        Self((whole as u128).saturating_mul(10u128.pow(TOKEN_DECIMALS)))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(n: u128) -> Self {
        Self(n)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.trim()
            .parse::<u128>()
            .map(Amount)
            .map_err(|_| serde::de::Error::custom(format!("invalid base-unit amount: {s}")))
    }
}

/// A governance replay-protection nonce (`uint256` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Nonce(u128);

impl Nonce {
    /// Wrap a nonce value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// The nonce value.
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// The 32-byte big-endian `uint256` word.
    pub fn to_be_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&self.0.to_be_bytes());
        word
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Nonce {
    fn from(n: u128) -> Self {
        Self(n)
    }
}

impl Serialize for Nonce {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Nonce {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Nonce>().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Nonce {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let parsed = match t.strip_prefix("0x") {
            Some(hex) => u128::from_str_radix(hex, 16),
            None => t.parse::<u128>(),
        };
        parsed
            .map(Nonce)
            .map_err(|_| ValidationError::InvalidNonce(s.to_string()))
    }
}
