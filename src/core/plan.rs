//! Pipeline plan (gauntlet.toml) parsing
//!
//! The plan names the toolchain project, how to build it, and which of its
//! modules the compiler under test compiles. Everything in it has a default,
//! so an empty plan file is the curated chibicc run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    DEFAULT_BUILD_TOOL, DEFAULT_PROJECT_DIR, DEFAULT_REFERENCE_COMPILER,
};
use crate::core::module::{default_modules, validate_modules, ModuleEntry};
use crate::error::PlanError;

fn default_project_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PROJECT_DIR)
}

fn default_build_tool() -> String {
    DEFAULT_BUILD_TOOL.to_string()
}

fn default_reference_compiler() -> String {
    DEFAULT_REFERENCE_COMPILER.to_string()
}

/// Fixed description of what a run does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelinePlan {
    /// Toolchain project root, relative to the starting directory
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    /// Build system executable
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// Host compiler pinned for the reference builds
    #[serde(default = "default_reference_compiler")]
    pub reference_compiler: String,

    /// Curated modules, compiled in list order
    #[serde(default = "default_modules")]
    pub modules: Vec<ModuleEntry>,
}

impl Default for PipelinePlan {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            build_tool: default_build_tool(),
            reference_compiler: default_reference_compiler(),
            modules: default_modules(),
        }
    }
}

/// Per-run overrides of plan fields
#[derive(Debug, Clone, Default)]
pub struct PlanOverrides {
    /// Replacement project directory
    pub project_dir: Option<PathBuf>,
    /// Replacement build tool
    pub build_tool: Option<String>,
    /// Replacement reference compiler
    pub reference_compiler: Option<String>,
}

impl PipelinePlan {
    /// Parse a plan from TOML and check its module list
    pub fn from_toml(content: &str) -> Result<Self, PlanError> {
        let plan: Self = toml::from_str(content)?;
        validate_modules(&plan.modules)?;
        Ok(plan)
    }

    /// Serialize the plan to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a plan from a file
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path).map_err(|e| PlanError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Apply command-line overrides; set fields win over the plan
    #[must_use]
    pub fn with_overrides(mut self, overrides: PlanOverrides) -> Self {
        if let Some(dir) = overrides.project_dir {
            self.project_dir = dir;
        }
        if let Some(tool) = overrides.build_tool {
            self.build_tool = tool;
        }
        if let Some(cc) = overrides.reference_compiler {
            self.reference_compiler = cc;
        }
        self
    }

    /// Modules compiled in this run, in list order
    pub fn enabled_modules(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.modules.iter().filter(|m| m.enabled)
    }
}
