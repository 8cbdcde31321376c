//! Support library for the windpark CLI binary.
//!
//! Exposes the command pipeline and logging setup so tests can drive a full
//! run without spawning a subprocess.

pub mod cli;
pub mod logging;
