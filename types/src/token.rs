//! Payment token selector.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The currency a proposal is priced and paid in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Token {
    /// The chain's native asset.
    Native,
    /// A fungible token contract with `balanceOf`/`transfer` semantics.
    Contract(Address),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Contract(addr) => write!(f, "token:{addr}"),
        }
    }
}
