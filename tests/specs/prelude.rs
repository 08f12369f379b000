//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two fast steps on actuators A and B
pub const QUICK_RECIPE: &str = r#"
name = "Quick"
cycles = 2

[[steps]]
actuators = ["A"]
duration = 0.1

[[steps]]
actuators = ["B"]
duration = 0.1
"#;

/// Universe A, B without driver commands
pub const AB_CONFIG: &str = r#"
log_root = "Logs"

[[actuator]]
id = "A"

[[actuator]]
id = "B"
"#;

/// Universe A, B whose commands append `+id` / `-id` to trace.txt
pub const TRACING_CONFIG: &str = r#"
log_root = "Logs"

[[actuator]]
id = "A"
activate = 'echo "+$ALD_ACTUATOR" >> trace.txt'
deactivate = 'echo "-$ALD_ACTUATOR" >> trace.txt'

[[actuator]]
id = "B"
activate = 'echo "+$ALD_ACTUATOR" >> trace.txt'
deactivate = 'echo "-$ALD_ACTUATOR" >> trace.txt'
"#;

/// Temporary working directory for one spec
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project with `ald.toml` and `quick.toml`
    pub fn quick() -> Self {
        let project = Self::empty();
        project.file("ald.toml", AB_CONFIG);
        project.file("quick.toml", QUICK_RECIPE);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    /// Progress logs written under `Logs/`, oldest first
    pub fn logs(&self) -> Vec<PathBuf> {
        let mut logs: Vec<PathBuf> = match std::fs::read_dir(self.dir.path().join("Logs")) {
            Ok(entries) => entries
                .map(|e| e.unwrap().path())
                .filter(|p| p.extension().is_some_and(|e| e == "txt"))
                .collect(),
            Err(_) => Vec::new(),
        };
        logs.sort();
        logs
    }

    /// `ald` running inside the project, isolated from the user's config dir
    pub fn ald(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("ald").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Expect exit status 0
    pub fn passes(self) -> RunOutput {
        self.exits(0)
    }

    /// Expect a non-zero exit status
    pub fn fails(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let out = RunOutput::from(output);
        assert_ne!(out.code, Some(0), "expected failure\n{}", out.dump());
        out
    }

    pub fn exits(mut self, code: i32) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let out = RunOutput::from(output);
        assert_eq!(out.code, Some(code), "unexpected exit status\n{}", out.dump());
        out
    }
}

pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunOutput {
    fn dump(&self) -> String {
        format!("--- stdout\n{}\n--- stderr\n{}", self.stdout, self.stderr)
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout lacks {needle:?}\n{}",
            self.dump()
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr lacks {needle:?}\n{}",
            self.dump()
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout has {needle:?}\n{}",
            self.dump()
        );
        self
    }
}
