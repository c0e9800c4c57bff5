//! Stable exit codes for the cleanup CLI.

/// Cleanup finished, there was nothing to do, or the operator cancelled.
pub const OK: i32 = 0;
/// Any error: invalid input or config, I/O failure, or a failed toolchain step.
pub const FAILED: i32 = 1;
