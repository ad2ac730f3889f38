//! ccgauntlet - C compiler build-and-validate harness
//!
//! This library drives a fixed pipeline against a C toolchain project: clean,
//! build with a reference compiler, compile a curated set of modules with the
//! compiler under test, rebuild, and run the project's test suite.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Pipeline planning, orchestration and reporting
//! - [`infra`] - Infrastructure layer (external processes, program lookup)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
