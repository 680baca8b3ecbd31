//! Stable exit codes for `sitenav` CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid config or scenario, or any other error.
pub const INVALID: i32 = 1;
