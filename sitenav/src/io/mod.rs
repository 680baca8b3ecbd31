//! File-backed inputs: site config and simulation scenarios.

pub mod config;
#[cfg(feature = "cli")]
pub mod scenario;
