//! Infrastructure layer
//!
//! Handles external processes and program lookup.
//! This module is the only place where child processes are spawned.

pub mod process;
pub mod toolchain;
