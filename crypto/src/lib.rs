//! Cryptographic primitives for Hive.
//!
//! - **Ed25519** for admission credentials and account keys
//! - **Blake2b** for hashing admission messages and deriving addresses
//! - Address derivation with `hive_` prefix and base32 encoding

pub mod address;
pub mod admission;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{contract_address, decode_address, derive_address, validate_address};
pub use admission::{admission_message, sign_admission, verify_admission};
pub use hash::{address_checksum, blake2b_256, tagged_hash, ADDRESS_CHECKSUM_LEN};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{sign_digest, verify_digest};
