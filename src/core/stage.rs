//! Pipeline stages and the invocations they issue
//!
//! Planning is pure: given the configuration and the plan, produce the exact
//! ordered list of external commands a run will issue. Nothing here spawns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::defaults::{CLEAN_TARGET, REFERENCE_COMPILER_VAR, TEST_TARGET};
use crate::core::config::BuildConfiguration;
use crate::core::plan::PipelinePlan;
use crate::error::ConfigError;

/// One step of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stage {
    /// Remove artifacts of earlier runs
    Clean,
    /// Default build target with the reference compiler pinned
    ReferenceBuild {
        /// 1 before the module pass, 2 after it
        pass: u8,
    },
    /// Compile one curated module with the compiler under test
    Compile {
        /// Source file being compiled
        module: String,
    },
    /// Run the project's test suite
    Test,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::ReferenceBuild { pass } => write!(f, "build (pass {pass})"),
            Self::Compile { module } => write!(f, "compile {module}"),
            Self::Test => write!(f, "test"),
        }
    }
}

/// A single external command: program, arguments, environment overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Executable name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Environment variables set on top of the inherited environment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Invocation with no arguments or environment overrides
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Append an argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for this invocation only
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Value of an environment override, if set
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Invocation {
    /// Shell-like rendering, e.g. `CC=gcc make`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={value} ")?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// A stage paired with the command it issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedStage {
    /// Which step this is
    pub stage: Stage,
    /// The command for it
    pub invocation: Invocation,
}

fn reference_build(plan: &PipelinePlan, pass: u8) -> PlannedStage {
    PlannedStage {
        stage: Stage::ReferenceBuild { pass },
        invocation: Invocation::new(&plan.build_tool)
            .env(REFERENCE_COMPILER_VAR, &plan.reference_compiler),
    }
}

/// Lay out every invocation of a run, in order
///
/// clean, build (pass 1), one compile per enabled module, build (pass 2), test.
/// Disabled modules produce no stage at all.
pub fn plan_stages(
    config: &BuildConfiguration,
    plan: &PipelinePlan,
) -> Result<Vec<PlannedStage>, ConfigError> {
    let mut stages = Vec::with_capacity(plan.modules.len() + 4);

    stages.push(PlannedStage {
        stage: Stage::Clean,
        invocation: Invocation::new(&plan.build_tool).arg(CLEAN_TARGET),
    });
    stages.push(reference_build(plan, 1));

    for module in plan.enabled_modules() {
        stages.push(PlannedStage {
            stage: Stage::Compile {
                module: module.source.clone(),
            },
            invocation: Invocation::new(config.compiler()).args(module.compile_args()?),
        });
    }

    stages.push(reference_build(plan, 2));
    stages.push(PlannedStage {
        stage: Stage::Test,
        invocation: Invocation::new(&plan.build_tool).arg(TEST_TARGET),
    });

    Ok(stages)
}
