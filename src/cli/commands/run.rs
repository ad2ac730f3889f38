//! Run command implementation
//!
//! Wires the parsed command line to the orchestrator and reports the result.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::output::{self, OutputConfig};
use crate::core::config::BuildConfiguration;
use crate::core::orchestrator::{FailurePolicy, Orchestrator};
use crate::core::plan::{PipelinePlan, PlanOverrides};
use crate::error::RunError;
use crate::infra::process::{OutputMode, SystemRunner};

/// Run options
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Compiler under test
    pub compiler: String,
    /// Plan file, if one was given
    pub plan_file: Option<PathBuf>,
    /// Plan fields overridden on the command line
    pub overrides: PlanOverrides,
    /// What to do after a failed stage
    pub policy: FailurePolicy,
    /// Only print the planned invocations
    pub dry_run: bool,
}

/// Load the plan file (or the built-in plan) and apply overrides
pub fn load_plan(options: &RunOptions) -> Result<PipelinePlan> {
    let plan = match &options.plan_file {
        Some(path) => PipelinePlan::load(path)
            .with_context(|| format!("Failed to load plan from {}", path.display()))?,
        None => PipelinePlan::default(),
    };
    Ok(plan.with_overrides(options.overrides.clone()))
}

/// Execute a run, returning the exit code the process should end with
pub fn execute(options: &RunOptions, output: &OutputConfig) -> Result<i32> {
    let base_dir = std::env::current_dir().map_err(|source| RunError::CurrentDir { source })?;
    let config = BuildConfiguration::new(options.compiler.clone())?;
    let plan = load_plan(options)?;

    let output_mode = if output.json {
        OutputMode::Capture
    } else {
        OutputMode::Inherit
    };
    let mut orchestrator = Orchestrator::new(SystemRunner::new(output_mode), plan, base_dir)
        .with_policy(options.policy);

    if options.dry_run {
        let stages = orchestrator.planned_stages(&config)?;
        output::print_plan(&stages, &orchestrator.project_root(), output)?;
        return Ok(0);
    }

    let report = orchestrator.run(&config)?;
    output::print_report(&report, output)?;

    Ok(report.exit_code())
}
