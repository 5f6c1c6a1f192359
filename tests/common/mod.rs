//! Common test utilities for golive CLI tests.
//!
//! Provides:
//! - `TestEnv`: isolated source + live directories with CLI helpers
//! - Fixtures: reusable file content constants

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
