//! Shared utilities for the Hive workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat};
