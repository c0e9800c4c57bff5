//! Prunes optional features out of the starter template.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure text transforms (marker stripping, per-file
//!   transformers, renaming). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (files, prompts, configuration,
//!   external toolchain processes).
//!
//! [`plan`] declares which paths each feature touches; [`run`] applies a plan
//! to a project root.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod plan;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
