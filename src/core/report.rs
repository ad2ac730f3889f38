//! Run report
//!
//! Ordered record of what each stage did. The run's overall result is the
//! test stage's outcome; everything else is kept for diagnostics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults::FAILURE_EXIT_CODE;
use crate::core::orchestrator::FailurePolicy;
use crate::core::stage::{Invocation, Stage};

/// How a single stage ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome {
    /// Exited with status zero
    Succeeded,
    /// Exited non-zero, or was killed by a signal (`code` is `None`)
    Failed { code: Option<i32> },
    /// The program could not be started
    SpawnFailed { error: String },
    /// Not attempted because an earlier stage halted the run
    Skipped,
}

impl StageOutcome {
    /// Whether the stage ran and exited zero
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Whether the stage was attempted and did not succeed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::SpawnFailed { .. })
    }
}

/// One stage's entry in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Which step this was
    pub stage: Stage,
    /// The command issued (or that would have been issued)
    pub invocation: Invocation,
    /// How it ended
    pub outcome: StageOutcome,
    /// Wall-clock time spent, in milliseconds
    pub duration_ms: u64,
    /// Captured stdout, if output was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    /// Captured stderr, if output was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// Everything a run did, in stage order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Compiler under test, as invoked
    pub compiler: String,
    /// Directory every stage ran in
    pub project_dir: PathBuf,
    /// Failure policy the run used
    pub policy: FailurePolicy,
    /// Stage records, in execution order
    pub stages: Vec<StageRecord>,
}

impl RunReport {
    /// Outcome of the terminal test stage
    pub fn test_outcome(&self) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .rev()
            .find(|r| r.stage == Stage::Test)
            .map(|r| &r.outcome)
    }

    /// Whether the run passed, judged by the test stage alone
    pub fn succeeded(&self) -> bool {
        self.test_outcome().is_some_and(StageOutcome::is_success)
    }

    /// Process exit code for the run
    ///
    /// 0 if the tests passed, the test stage's own code if it failed with one,
    /// [`FAILURE_EXIT_CODE`] otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.test_outcome() {
            Some(StageOutcome::Succeeded) => 0,
            Some(StageOutcome::Failed { code: Some(code) }) if *code != 0 => *code,
            _ => FAILURE_EXIT_CODE,
        }
    }

    /// Stages that were attempted and failed
    pub fn failed_stages(&self) -> Vec<&StageRecord> {
        self.stages
            .iter()
            .filter(|r| r.outcome.is_failure())
            .collect()
    }

    /// Number of stages that were actually attempted
    pub fn attempted_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|r| r.outcome != StageOutcome::Skipped)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stage: Stage, outcome: StageOutcome) -> StageRecord {
        StageRecord {
            stage,
            invocation: Invocation::new("make"),
            outcome,
            duration_ms: 0,
            stdout: None,
            stderr: None,
        }
    }

    fn report(records: Vec<StageRecord>) -> RunReport {
        RunReport {
            compiler: "shlang".to_string(),
            project_dir: PathBuf::from("chibicc"),
            policy: FailurePolicy::Continue,
            stages: records,
        }
    }

    #[test]
    fn test_passing_tests_mean_success_despite_earlier_failures() {
        let report = report(vec![
            record(Stage::Clean, StageOutcome::Succeeded),
            record(
                Stage::Compile {
                    module: "type.c".to_string(),
                },
                StageOutcome::Failed { code: Some(1) },
            ),
            record(Stage::Test, StageOutcome::Succeeded),
        ]);

        assert!(report.succeeded());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.failed_stages().len(), 1);
    }

    #[test]
    fn test_failing_tests_propagate_exit_code() {
        let report = report(vec![record(Stage::Test, StageOutcome::Failed { code: Some(2) })]);
        assert!(!report.succeeded());
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_signal_killed_tests_exit_with_failure_code() {
        let report = report(vec![record(Stage::Test, StageOutcome::Failed { code: None })]);
        assert_eq!(report.exit_code(), FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_skipped_tests_are_failure() {
        let report = report(vec![
            record(Stage::Clean, StageOutcome::Failed { code: Some(2) }),
            record(Stage::Test, StageOutcome::Skipped),
        ]);
        assert!(!report.succeeded());
        assert_eq!(report.exit_code(), FAILURE_EXIT_CODE);
        assert_eq!(report.attempted_count(), 1);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(StageOutcome::Failed { code: Some(1) }).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["code"], 1);
    }
}
