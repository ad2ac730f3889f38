//! Default configuration values

/// Toolchain project directory, relative to where the harness is started
pub const DEFAULT_PROJECT_DIR: &str = "chibicc";

/// Build system driving the toolchain project
pub const DEFAULT_BUILD_TOOL: &str = "make";

/// Host compiler used for the reference builds
pub const DEFAULT_REFERENCE_COMPILER: &str = "gcc";

/// Environment variable the build system reads its host compiler from
pub const REFERENCE_COMPILER_VAR: &str = "CC";

/// Build system target that removes previous artifacts
pub const CLEAN_TARGET: &str = "clean";

/// Build system target that runs the test suite
pub const TEST_TARGET: &str = "test";

/// Optimization level used for curated modules
pub const DEFAULT_OPT_LEVEL: &str = "1";

/// Exit code reported when the run did not produce a usable test outcome
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Bytes of captured child output kept per stream
pub const CAPTURE_LIMIT: usize = 64 * 1024;

