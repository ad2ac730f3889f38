//! Run configuration
//!
//! The single external input of a run: which compiler is under test.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration supplied once per run
///
/// Immutable after construction. The compiler is either a name resolved on
/// the search path or a path to an executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuildConfiguration")]
pub struct BuildConfiguration {
    compiler: String,
}

/// Unvalidated wire form; deserialization goes through [`BuildConfiguration::new`]
#[derive(Deserialize)]
struct RawBuildConfiguration {
    compiler: String,
}

impl TryFrom<RawBuildConfiguration> for BuildConfiguration {
    type Error = ConfigError;

    fn try_from(raw: RawBuildConfiguration) -> Result<Self, Self::Error> {
        Self::new(raw.compiler)
    }
}

impl BuildConfiguration {
    /// Create a configuration for the given compiler
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCompiler`] if `compiler` is empty or only whitespace.
    pub fn new(compiler: impl Into<String>) -> Result<Self, ConfigError> {
        let compiler = compiler.into();
        if compiler.trim().is_empty() {
            return Err(ConfigError::EmptyCompiler);
        }
        Ok(Self { compiler })
    }

    /// The compiler under test
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// Replace the compiler with an already-resolved form of itself
    #[must_use]
    pub(crate) fn with_resolved_compiler(mut self, resolved: String) -> Self {
        self.compiler = resolved;
        self
    }
}
