//! EAN-8/EAN-13 product code validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated EAN-8 or EAN-13 product code.
///
/// A candidate is accepted only if every character is an ASCII digit and
/// the length is exactly 8 or 13. No checksum verification is performed;
/// the storefronts resolve the code themselves and an unknown code simply
/// yields no price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Ean(String);

impl Ean {
    /// Validates a candidate code. The input is taken as-is: callers strip
    /// transport whitespace before validation.
    pub fn parse(candidate: &str) -> Result<Self, InvalidEan> {
        let valid_length = candidate.len() == 8 || candidate.len() == 13;
        if valid_length && candidate.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(InvalidEan(candidate.to_string()))
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the 13-digit form.
    pub fn is_ean13(&self) -> bool {
        self.0.len() == 13
    }
}

impl fmt::Display for Ean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ean {
    type Err = InvalidEan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Ean {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ean {
    type Error = InvalidEan;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ean> for String {
    fn from(ean: Ean) -> Self {
        ean.0
    }
}

/// Error for a candidate that is not a well-formed EAN code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid EAN '{0}': expected exactly 8 or 13 ASCII digits")]
pub struct InvalidEan(pub String);
