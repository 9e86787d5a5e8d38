// Integration test utilities and common code
// WHY: every CLI and pipeline test needs an isolated directory of seeded files

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temporary directory holding files with known line endings
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a file with the given raw bytes
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create a subdirectory
    pub fn create_dir<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        let dir_path = self.root_path.join(relative_path);
        fs::create_dir_all(&dir_path).expect("Failed to create directory");
        dir_path
    }

    /// Read a file back as raw bytes
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Vec<u8> {
        fs::read(self.root_path.join(path)).expect("Failed to read test file")
    }

    /// Names of everything directly inside the fixture root, sorted
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.root_path)
            .expect("Failed to list fixture root")
            .map(|e| e.expect("Bad dir entry").file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

/// Run the built `fixle` binary with `args`, from inside the fixture root
pub fn run_fixle(fixture: &TestFixture, args: &[&str]) -> Output {
    run_fixle_with_env(fixture, args, &[])
}

/// Like [`run_fixle`], with extra environment variables set for the child
pub fn run_fixle_with_env(fixture: &TestFixture, args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fixle"))
        .args(args)
        .current_dir(&fixture.root_path)
        .env_remove("FIXLE_LOG")
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to run fixle")
}

/// Stdout of a finished run as lines
pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Stderr of a finished run as text
pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
