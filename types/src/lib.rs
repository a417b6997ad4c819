//! Fundamental types for the Hive revenue-sharing ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, amounts, basis points, identifiers, payment tokens, keys and timestamps.

pub mod address;
pub mod amount;
pub mod bps;
pub mod ids;
pub mod keys;
pub mod time;
pub mod token;

pub use address::{Address, AddressError};
pub use amount::Amount;
pub use bps::BasisPoints;
pub use ids::{JobId, MemberId, PlatformId, RequestId};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
pub use token::Token;
