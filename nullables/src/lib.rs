//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator a hive talks to is abstracted behind a trait in
//! `hive_core::external`. This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (open jobs, release funds, move time)
//! - Never touch the filesystem or network
//!
//! Usage: wire them into `hive_core::Collaborators` in tests.

pub mod bank;
pub mod clock;
pub mod escrow;
pub mod registry;

pub use bank::NullBank;
pub use clock::NullClock;
pub use escrow::NullEscrow;
pub use registry::NullIdentityRegistry;
