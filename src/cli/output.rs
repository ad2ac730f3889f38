//! Output formatting
//!
//! This module renders run reports and planned invocations for the user,
//! either as status lines or as JSON for scripting.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::core::report::{RunReport, StageOutcome, StageRecord};
use crate::core::stage::PlannedStage;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Skipped prefix
    pub const SKIPPED: &str = "–";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}

/// Output settings chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress the summary
    pub quiet: bool,
    /// Emit JSON instead of status lines
    pub json: bool,
    /// Verbosity count (`-v`, `-vv`)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output settings
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Default log level for the tracing subscriber
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// One summary line for a stage record
pub fn format_stage_line(record: &StageRecord) -> String {
    match &record.outcome {
        StageOutcome::Succeeded => format!(
            "{} {} ({} ms)",
            status::SUCCESS,
            record.stage,
            record.duration_ms
        ),
        StageOutcome::Failed { code: Some(code) } => format!(
            "{} {}: exit code {code} ({} ms)",
            status::ERROR,
            record.stage,
            record.duration_ms
        ),
        StageOutcome::Failed { code: None } => format!(
            "{} {}: terminated by signal ({} ms)",
            status::ERROR,
            record.stage,
            record.duration_ms
        ),
        StageOutcome::SpawnFailed { error } => format!(
            "{} {}: could not run '{}': {error}",
            status::ERROR,
            record.stage,
            record.invocation.program
        ),
        StageOutcome::Skipped => format!("{} {}: skipped", status::SKIPPED, record.stage),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the outcome of a run
pub fn print_report(report: &RunReport, config: &OutputConfig) -> Result<()> {
    if config.json {
        return print_json(report);
    }
    if config.quiet {
        return Ok(());
    }

    println!();
    println!("Stages run in {}:", report.project_dir.display());
    for record in &report.stages {
        println!("  {}", format_stage_line(record));
    }

    let failed = report.failed_stages().len();
    if report.succeeded() {
        if failed == 0 {
            println!("{} Tests passed with '{}'", status::SUCCESS, report.compiler);
        } else {
            println!(
                "{} Tests passed with '{}' ({failed} earlier stage(s) failed)",
                status::WARNING,
                report.compiler
            );
        }
    } else {
        println!("{} Tests did not pass with '{}'", status::ERROR, report.compiler);
    }

    Ok(())
}

/// Print the invocations a run would issue
pub fn print_plan(stages: &[PlannedStage], project_root: &Path, config: &OutputConfig) -> Result<()> {
    if config.json {
        return print_json(stages);
    }

    println!("Would run in {}:", project_root.display());
    for (index, planned) in stages.iter().enumerate() {
        println!("  {:>2}. {}: {}", index + 1, planned.stage, planned.invocation);
    }
    Ok(())
}

/// Display an error and its causes on stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}
