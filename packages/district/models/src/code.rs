//! Canonical school district codes.
//!
//! The state education department publishes district codes as eight-digit
//! identifiers (e.g. `"00350000"` for Boston), but spreadsheets and boundary
//! files routinely drop the leading zeros. Every join between boundary
//! features, metric rows, and chart points goes through [`DistrictCode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Fixed width of a canonical district code.
pub const CODE_WIDTH: usize = 8;

/// Error returned when a raw code cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid district code '{raw}': {reason}")]
pub struct InvalidDistrictCode {
    /// The raw input that failed to normalize.
    pub raw: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

/// A zero-padded, eight-digit district code.
///
/// Construction through [`DistrictCode::parse`] is the only way to obtain
/// one, so holding a `DistrictCode` means the value is already canonical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistrictCode(String);

impl DistrictCode {
    /// Normalizes a raw code by trimming whitespace and left-padding with
    /// zeros to [`CODE_WIDTH`] characters.
    ///
    /// Parsing an already canonical code returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDistrictCode`] if the trimmed input is empty,
    /// contains anything other than ASCII digits, or is wider than
    /// [`CODE_WIDTH`].
    pub fn parse(raw: &str) -> Result<Self, InvalidDistrictCode> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(InvalidDistrictCode {
                raw: raw.to_owned(),
                reason: "empty",
            });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidDistrictCode {
                raw: raw.to_owned(),
                reason: "not numeric",
            });
        }
        if trimmed.len() > CODE_WIDTH {
            return Err(InvalidDistrictCode {
                raw: raw.to_owned(),
                reason: "wider than 8 digits",
            });
        }

        Ok(Self(format!("{trimmed:0>CODE_WIDTH$}")))
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistrictCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DistrictCode {
    type Err = InvalidDistrictCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for DistrictCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for DistrictCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DistrictCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
