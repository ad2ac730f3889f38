//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::core::orchestrator::FailurePolicy;
use crate::core::plan::PlanOverrides;
use commands::run::RunOptions;
use output::OutputConfig;

/// ccgauntlet - Run a C compiler under test against a toolchain project
///
/// Cleans and builds the project with a reference compiler, compiles a curated
/// set of its modules with COMPILER, rebuilds, and runs the project's tests.
/// The exit status is the test suite's.
#[derive(Parser, Debug)]
#[command(name = "ccgauntlet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Compiler under test (name on PATH or path to an executable)
    #[arg(value_name = "COMPILER", value_parser = NonEmptyStringValueParser::new())]
    pub compiler: String,

    /// Plan file describing the project and module list
    #[arg(long, value_name = "FILE", env = "CCGAUNTLET_PLAN")]
    pub plan: Option<PathBuf>,

    /// Toolchain project directory (overrides the plan)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Build system executable (overrides the plan)
    #[arg(long, value_name = "PROGRAM")]
    pub build_tool: Option<String>,

    /// Host compiler for the reference builds (overrides the plan)
    #[arg(long, value_name = "CC", env = "CCGAUNTLET_REFERENCE_CC")]
    pub reference_cc: Option<String>,

    /// Stop at the first failing stage instead of pressing on to the tests
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the invocations that would run, without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the run summary
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Output the run report as JSON (child output is captured into it)
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Output settings selected on the command line
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.json, self.verbose)
    }

    /// Execute the run and return the process exit code
    pub async fn run(self) -> Result<i32> {
        let output = self.output_config();
        let options = RunOptions {
            compiler: self.compiler,
            plan_file: self.plan,
            overrides: PlanOverrides {
                project_dir: self.project_dir,
                build_tool: self.build_tool,
                reference_compiler: self.reference_cc,
            },
            policy: if self.fail_fast {
                FailurePolicy::HaltOnFailure
            } else {
                FailurePolicy::Continue
            },
            dry_run: self.dry_run,
        };

        // Stages block on child processes; keep them off the async workers.
        tokio::task::spawn_blocking(move || commands::run::execute(&options, &output))
            .await
            .context("Run task panicked")?
    }
}
