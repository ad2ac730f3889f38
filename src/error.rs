//! Error types for ccgauntlet
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Compiler identifier is empty
    #[error("Compiler must not be empty")]
    EmptyCompiler,

    /// Module entry without a source file
    #[error("Module entry #{index} has an empty source name")]
    EmptyModuleSource { index: usize },

    /// Module source name that cannot produce an object file
    #[error("Module '{source_name}' has no file stem to derive an object name from")]
    InvalidModuleSource { source_name: String },

    /// Two enabled modules writing the same object file
    #[error("Modules '{first}' and '{second}' both compile to '{object}'")]
    DuplicateObject {
        first: String,
        second: String,
        object: String,
    },
}

/// Plan file errors
#[derive(Error, Debug)]
pub enum PlanError {
    /// Plan file could not be read
    #[error("Failed to read plan file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Plan file is not valid TOML or has the wrong shape
    #[error("Failed to parse plan file: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    /// Plan parsed but violates a module invariant
    #[error("Invalid plan: {0}")]
    Invalid(#[from] ConfigError),
}

/// Errors that stop a run before any stage is invoked
#[derive(Error, Debug)]
pub enum RunError {
    /// Toolchain project directory does not exist
    #[error("Project directory not found: {path}")]
    ProjectDirNotFound { path: PathBuf },

    /// Project path exists but is not a directory
    #[error("Project path is not a directory: {path}")]
    ProjectDirNotADirectory { path: PathBuf },

    /// Current directory could not be determined
    #[error("Failed to determine the current directory: {source}")]
    CurrentDir { source: std::io::Error },
}

/// Top-level ccgauntlet error type
#[derive(Error, Debug)]
pub enum GauntletError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan error
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Run error
    #[error("{0}")]
    Run(#[from] RunError),
}
