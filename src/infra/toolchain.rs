//! Toolchain program resolution
//!
//! Stages run inside the project directory, so program paths the user typed
//! relative to where the harness was started are anchored first.

use std::path::{Path, PathBuf};

/// Anchor a relative program path to `base_dir`
///
/// Bare names (no path separator) are left alone for search-path lookup, and
/// absolute paths are returned unchanged.
pub fn anchor_program(program: &str, base_dir: &Path) -> String {
    let path = Path::new(program);
    let has_separator = program.contains('/') || program.contains(std::path::MAIN_SEPARATOR);
    if path.is_absolute() || !has_separator {
        return program.to_string();
    }
    base_dir.join(path).to_string_lossy().into_owned()
}

/// Locate a program the way a spawn would
///
/// Bare names are searched on `PATH`; paths are checked directly.
pub fn locate_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
