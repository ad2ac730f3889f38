//! Build-and-validate orchestration
//!
//! Drives the fixed pipeline against one project directory:
//!
//! 1. clean
//! 2. reference build (pass 1), host compiler pinned
//! 3. one compile per enabled module, with the compiler under test
//! 4. reference build (pass 2), host compiler pinned
//! 5. test
//!
//! Stages run one at a time, each blocking until its process exits. The
//! process's own current directory is never changed; every invocation gets the
//! project root as its working directory instead.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::config::BuildConfiguration;
use crate::core::plan::PipelinePlan;
use crate::core::report::{RunReport, StageOutcome, StageRecord};
use crate::core::stage::{plan_stages, PlannedStage};
use crate::error::{GauntletError, RunError};
use crate::infra::process::CommandRunner;
use crate::infra::toolchain::{anchor_program, locate_program};

/// What to do after a stage fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Attempt every stage regardless of earlier outcomes
    #[default]
    Continue,
    /// Stop at the first failed stage and mark the rest skipped
    HaltOnFailure,
}

/// Runs the pipeline through a [`CommandRunner`]
#[derive(Debug)]
pub struct Orchestrator<R> {
    runner: R,
    plan: PipelinePlan,
    base_dir: PathBuf,
    policy: FailurePolicy,
}

impl<R: CommandRunner> Orchestrator<R> {
    /// Create an orchestrator whose project directory is resolved against `base_dir`
    pub fn new(runner: R, plan: PipelinePlan, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            plan,
            base_dir: base_dir.into(),
            policy: FailurePolicy::default(),
        }
    }

    /// Set the failure policy
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Consume the orchestrator and hand back its runner
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Absolute-or-base-relative project root
    pub fn project_root(&self) -> PathBuf {
        self.base_dir.join(&self.plan.project_dir)
    }

    /// Every invocation the run would issue, without issuing any
    pub fn planned_stages(
        &self,
        config: &BuildConfiguration,
    ) -> Result<Vec<PlannedStage>, GauntletError> {
        let config = config
            .clone()
            .with_resolved_compiler(anchor_program(config.compiler(), &self.base_dir));
        let plan = PipelinePlan {
            build_tool: anchor_program(&self.plan.build_tool, &self.base_dir),
            ..self.plan.clone()
        };
        Ok(plan_stages(&config, &plan)?)
    }

    /// Run the whole pipeline
    ///
    /// Fails only if the run cannot start (missing project directory, unusable
    /// module list). Once stages are running, failures are recorded in the
    /// report and handled according to the failure policy.
    pub fn run(&mut self, config: &BuildConfiguration) -> Result<RunReport, GauntletError> {
        let project_root = self.project_root();
        check_project_dir(&project_root)?;

        let stages = self.planned_stages(config)?;
        let compiler = anchor_program(config.compiler(), &self.base_dir);
        if locate_program(&compiler).is_none() {
            tracing::warn!("Compiler '{}' not found; its compile stages will fail", compiler);
        }

        tracing::info!(
            "Running {} stages in {} with compiler '{}'",
            stages.len(),
            project_root.display(),
            compiler
        );

        let mut records = Vec::with_capacity(stages.len());
        let mut halted = false;

        for planned in stages {
            if halted {
                records.push(skipped(planned));
                continue;
            }

            let record = self.run_stage(planned, &project_root);
            if record.outcome.is_failure() && self.policy == FailurePolicy::HaltOnFailure {
                tracing::warn!("Halting after failed stage '{}'", record.stage);
                halted = true;
            }
            records.push(record);
        }

        Ok(RunReport {
            compiler,
            project_dir: project_root,
            policy: self.policy,
            stages: records,
        })
    }

    fn run_stage(&mut self, planned: PlannedStage, working_dir: &Path) -> StageRecord {
        let PlannedStage { stage, invocation } = planned;
        tracing::info!("Stage '{}': {}", stage, invocation);

        let started = Instant::now();
        let result = self.runner.run(&invocation, working_dir);
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (outcome, stdout, stderr) = match result {
            Ok(output) if output.success => (StageOutcome::Succeeded, output.stdout, output.stderr),
            Ok(output) => {
                tracing::warn!(
                    "Stage '{}' failed with {}",
                    stage,
                    output
                        .code
                        .map_or_else(|| "a signal".to_string(), |c| format!("exit code {c}"))
                );
                (
                    StageOutcome::Failed { code: output.code },
                    output.stdout,
                    output.stderr,
                )
            }
            Err(e) => {
                tracing::warn!("Stage '{}' could not start '{}': {}", stage, invocation.program, e);
                (
                    StageOutcome::SpawnFailed {
                        error: e.to_string(),
                    },
                    None,
                    None,
                )
            }
        };

        StageRecord {
            stage,
            invocation,
            outcome,
            duration_ms,
            stdout,
            stderr,
        }
    }
}

fn skipped(planned: PlannedStage) -> StageRecord {
    StageRecord {
        stage: planned.stage,
        invocation: planned.invocation,
        outcome: StageOutcome::Skipped,
        duration_ms: 0,
        stdout: None,
        stderr: None,
    }
}

fn check_project_dir(path: &Path) -> Result<(), RunError> {
    if !path.exists() {
        return Err(RunError::ProjectDirNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(RunError::ProjectDirNotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
