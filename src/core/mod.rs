//! Core logic module
//!
//! Planning and orchestration of a run. Processes are only spawned through
//! the [`crate::infra::process::CommandRunner`] seam.
//!
//! # Submodules
//!
//! - [`config`] - The run's single input, the compiler under test
//! - [`module`] - Curated module list and per-module compile options
//! - [`plan`] - Pipeline plan (gauntlet.toml) parsing
//! - [`stage`] - Stages and the invocations they issue
//! - [`orchestrator`] - Sequential execution and failure policy
//! - [`report`] - Per-stage outcomes and the run result

pub mod config;
pub mod module;
pub mod orchestrator;
pub mod plan;
pub mod report;
pub mod stage;
