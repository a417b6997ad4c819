//! Account and contract address type with `hive_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must start with {}", Address::PREFIX)]
    MissingPrefix,

    #[error("address has an empty body")]
    Empty,
}

/// A Hive address, always prefixed with `hive_`.
///
/// Accounts derive theirs from an Ed25519 public key; group contracts derive
/// theirs from the factory address and a creation nonce. Both encodings are
/// produced by `hive_crypto::address`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard prefix for all Hive addresses.
    pub const PREFIX: &'static str = "hive_";

    /// Parse an address string, checking only the prefix.
    ///
    /// Checksum validation lives in `hive_crypto::validate_address`.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AddressError> {
        let s = raw.into();
        if !s.starts_with(Self::PREFIX) {
            return Err(AddressError::MissingPrefix);
        }
        if s.len() == Self::PREFIX.len() {
            return Err(AddressError::Empty);
        }
        Ok(Self(s))
    }

    /// Build an address from an already-encoded, non-empty body.
    ///
    /// Used by the address encoders, whose output always has a body.
    pub fn from_body(body: &str) -> Self {
        debug_assert!(!body.is_empty(), "address body must not be empty");
        Self(format!("{}{body}", Self::PREFIX))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed() {
        let addr = Address::parse("hive_abc").unwrap();
        assert_eq!(addr.as_str(), "hive_abc");
    }

    #[test]
    fn parse_rejects_foreign_prefix() {
        assert_eq!(Address::parse("brst_abc"), Err(AddressError::MissingPrefix));
    }

    #[test]
    fn from_body_prepends_prefix() {
        let addr = Address::from_body("abc");
        assert_eq!(addr, Address::parse("hive_abc").unwrap());
    }

    #[test]
    fn parse_rejects_bare_prefix() {
        assert_eq!(Address::parse("hive_"), Err(AddressError::Empty));
    }
}
