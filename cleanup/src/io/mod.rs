//! I/O helpers for the cleanup run.

pub mod config;
pub mod files;
pub mod manifest;
pub mod process;
pub mod prompt;
pub mod toolchain;
