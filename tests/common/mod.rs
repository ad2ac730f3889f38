//! Common test utilities and helpers
//!
//! Integration tests run the real binary against a fake toolchain project
//! whose `make` and compiler are shell scripts that append their argv to a
//! log file.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Fake build system: logs `make|<args>|<CC>|<cwd>`
pub const FAKE_MAKE: &str = r#"#!/bin/sh
echo "make|$*|${CC-}|$(pwd)" >> "$GAUNTLET_LOG"
if [ "$1" = "test" ]; then
    exit "${FAKE_TEST_EXIT:-0}"
fi
exit 0
"#;

/// Fake compiler: logs `cc|<args>|<cwd>` and touches the `-o` output
pub const FAKE_CC: &str = r#"#!/bin/sh
echo "cc|$*|$(pwd)" >> "$GAUNTLET_LOG"
if [ -n "${FAKE_CC_FAIL-}" ]; then
    for a in "$@"; do
        if [ "$a" = "$FAKE_CC_FAIL" ]; then
            exit 1
        fi
    done
fi
out=""
prev=""
for a in "$@"; do
    if [ "$prev" = "-o" ]; then
        out="$a"
    fi
    prev="$a"
done
if [ -n "$out" ]; then
    : > "$out"
fi
exit 0
"#;

/// Test workspace context
///
/// A temporary directory holding `chibicc/` (the project), `tools/` (fake
/// programs) and `invocations.log`.
pub struct TestProject {
    /// Temporary directory the harness is started from
    pub dir: TempDir,
}

impl TestProject {
    /// Create a workspace with an empty `chibicc/` project and fake tools
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        project.create_dir("chibicc");
        project.create_script("tools/make", FAKE_MAKE);
        project.create_script("tools/fakecc", FAKE_CC);
        project
    }

    /// Get the path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Absolute path to a fake tool
    pub fn tool(&self, name: &str) -> String {
        self.dir
            .path()
            .join("tools")
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    /// Path of the invocation log
    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("invocations.log")
    }

    /// Logged invocations, one entry per line
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create an executable script in the workspace
    pub fn create_script(&self, name: &str, content: &str) {
        self.create_file(name, content);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let path = self.dir.path().join(name);
            let mut perms = std::fs::metadata(&path)
                .expect("Failed to stat script")
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).expect("Failed to make script executable");
        }
    }

    /// Create a directory in the workspace
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Command for the harness binary, started in the workspace with fake make
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ccgauntlet"));
        cmd.current_dir(self.path())
            .env("GAUNTLET_LOG", self.log_path())
            .env_remove("CC")
            .env_remove("RUST_LOG")
            .env_remove("CCGAUNTLET_PLAN")
            .env_remove("CCGAUNTLET_REFERENCE_CC")
            .arg("--build-tool")
            .arg(self.tool("make"));
        cmd
    }

    /// Run the harness with extra arguments
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute ccgauntlet")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Plan file with one disabled module
#[allow(dead_code)]
pub const SAMPLE_PLAN: &str = r#"
reference_compiler = "clang"

[[modules]]
source = "main.c"
flags = { optimize = "2" }

[[modules]]
source = "parse.c"
enabled = false

[[modules]]
source = "codegen.c"
flags = { dump_ir = "ir" }
"#;
