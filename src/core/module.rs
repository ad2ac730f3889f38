//! Curated module list
//!
//! Each entry names one source file of the toolchain project that the
//! compiler under test compiles on its own. Entries are toggled with
//! `enabled` rather than removed, so the list doubles as a record of
//! which modules are known to work and which are not yet supported.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::DEFAULT_OPT_LEVEL;
use crate::error::ConfigError;

/// Extra option passed to the compiler for a single module
///
/// A module gets either an optimization level or IR dumping, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompileFlags {
    /// `-O<level>`
    Optimize(String),
    /// `--dump-ir <dir>`
    DumpIr(String),
    /// No extra option
    #[default]
    Plain,
}

impl CompileFlags {
    /// Command-line arguments for this variant
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Self::Optimize(level) => vec![format!("-O{level}")],
            Self::DumpIr(dir) => vec!["--dump-ir".to_string(), dir.clone()],
            Self::Plain => Vec::new(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// One entry of the curated module list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Source file, relative to the project root
    pub source: String,

    /// Whether the module is compiled in this run
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Extra compiler option for this module
    #[serde(default)]
    pub flags: CompileFlags,
}

impl ModuleEntry {
    /// Create an enabled entry
    pub fn new(source: impl Into<String>, flags: CompileFlags) -> Self {
        Self {
            source: source.into(),
            enabled: true,
            flags,
        }
    }

    /// Create an entry that is kept in the list but not compiled
    pub fn disabled(source: impl Into<String>, flags: CompileFlags) -> Self {
        Self {
            enabled: false,
            ..Self::new(source, flags)
        }
    }

    /// Object file the compiler writes for this module
    ///
    /// The source path with its extension replaced by `.o`.
    pub fn object_name(&self) -> Result<String, ConfigError> {
        let path = Path::new(&self.source);
        if path.file_stem().is_none() {
            return Err(ConfigError::InvalidModuleSource {
                source_name: self.source.clone(),
            });
        }
        Ok(path.with_extension("o").to_string_lossy().into_owned())
    }

    /// Compiler arguments: `-c <source> -o <object> [flags...]`
    pub fn compile_args(&self) -> Result<Vec<String>, ConfigError> {
        let mut args = vec![
            "-c".to_string(),
            self.source.clone(),
            "-o".to_string(),
            self.object_name()?,
        ];
        args.extend(self.flags.to_args());
        Ok(args)
    }
}

/// Check a module list before any stage runs
///
/// Every entry needs a usable source name, and no two enabled entries may
/// write the same object file.
pub fn validate_modules(modules: &[ModuleEntry]) -> Result<(), ConfigError> {
    let mut objects: HashMap<PathBuf, &str> = HashMap::new();

    for (index, module) in modules.iter().enumerate() {
        if module.source.trim().is_empty() {
            return Err(ConfigError::EmptyModuleSource { index });
        }
        let object = module.object_name()?;
        if !module.enabled {
            continue;
        }
        let key = normalized(Path::new(&object));
        if let Some(first) = objects.get(&key) {
            return Err(ConfigError::DuplicateObject {
                first: (*first).to_string(),
                second: module.source.clone(),
                object,
            });
        }
        objects.insert(key, &module.source);
    }

    Ok(())
}

/// Drop `.` components so `./a.o` and `a.o` compare equal
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// The curated chibicc subset
///
/// `tokenize.c` is not supported yet and stays in the list disabled.
pub fn default_modules() -> Vec<ModuleEntry> {
    let opt = || CompileFlags::Optimize(DEFAULT_OPT_LEVEL.to_string());
    vec![
        ModuleEntry::new("unicode.c", opt()),
        ModuleEntry::new("hashmap.c", opt()),
        ModuleEntry::new("type.c", opt()),
        ModuleEntry::new("strings.c", CompileFlags::DumpIr(".".to_string())),
        ModuleEntry::disabled("tokenize.c", CompileFlags::Plain),
    ]
}
