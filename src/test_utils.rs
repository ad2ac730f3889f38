//! Test utilities for property-based testing
//!
//! This module provides generators and a recording command runner.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::module::{CompileFlags, ModuleEntry};

    /// Generate a C source file name
    pub fn source_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,8}".prop_map(|stem| format!("{stem}.c"))
    }

    /// Generate a compile option variant
    pub fn compile_flags() -> impl Strategy<Value = CompileFlags> {
        prop_oneof![
            "[0-3sz]".prop_map(CompileFlags::Optimize),
            "[a-z.]{1,6}".prop_map(CompileFlags::DumpIr),
            Just(CompileFlags::Plain),
        ]
    }

    /// Generate a module entry, enabled roughly three times in four
    pub fn module_entry() -> impl Strategy<Value = ModuleEntry> {
        (source_name(), prop::bool::weighted(0.75), compile_flags()).prop_map(
            |(source, enabled, flags)| ModuleEntry {
                source,
                enabled,
                flags,
            },
        )
    }

    /// Generate a module list
    pub fn module_list() -> impl Strategy<Value = Vec<ModuleEntry>> {
        prop::collection::vec(module_entry(), 0..12)
    }
}

#[cfg(test)]
pub mod runner {
    use std::io;
    use std::path::{Path, PathBuf};

    use crate::core::stage::Invocation;
    use crate::infra::process::{CommandRunner, ProcessOutput};

    /// Records every invocation instead of spawning it
    ///
    /// Invocations whose rendering contains a `fail_on` pattern exit with the
    /// given code; invocations of a `missing` program fail to start.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        calls: Vec<(Invocation, PathBuf)>,
        failures: Vec<(String, i32)>,
        missing: Vec<String>,
    }

    impl RecordingRunner {
        /// Runner where every invocation succeeds
        pub fn new() -> Self {
            Self::default()
        }

        /// Make invocations containing `pattern` exit with `code`
        #[must_use]
        pub fn fail_on(mut self, pattern: &str, code: i32) -> Self {
            self.failures.push((pattern.to_string(), code));
            self
        }

        /// Make `program` fail to start
        #[must_use]
        pub fn missing(mut self, program: &str) -> Self {
            self.missing.push(program.to_string());
            self
        }

        /// Invocations seen so far, with their working directories
        pub fn calls(&self) -> &[(Invocation, PathBuf)] {
            &self.calls
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(
            &mut self,
            invocation: &Invocation,
            working_dir: &Path,
        ) -> io::Result<ProcessOutput> {
            self.calls
                .push((invocation.clone(), working_dir.to_path_buf()));

            if self.missing.iter().any(|p| *p == invocation.program) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} not found", invocation.program),
                ));
            }

            let rendered = invocation.to_string();
            let code = self
                .failures
                .iter()
                .find(|(pattern, _)| rendered.contains(pattern.as_str()))
                .map_or(0, |(_, code)| *code);
            Ok(ProcessOutput::exited(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::module::validate_modules;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_source_name_generator(name in source_name()) {
            prop_assert!(name.ends_with(".c"));
            prop_assert!(name.len() > 2);
        }

        #[test]
        fn test_module_entries_have_object_names(entry in module_entry()) {
            let object = entry.object_name().unwrap();
            prop_assert!(object.ends_with(".o"));
        }

        #[test]
        fn test_unique_lists_validate(list in module_list()) {
            let mut seen = std::collections::HashSet::new();
            let unique = list.iter().filter(|m| m.enabled).all(|m| seen.insert(m.source.clone()));
            prop_assert_eq!(validate_modules(&list).is_ok(), unique);
        }
    }
}
