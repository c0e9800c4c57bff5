//! Deterministic, pure logic for the cleanup engine.
//!
//! Core modules must be free of I/O side effects. They map text to text and
//! return deterministic outputs suitable for tests.

pub mod markers;
pub mod rename;
pub mod transforms;
pub mod types;
