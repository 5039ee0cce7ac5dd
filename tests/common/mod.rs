/// Shared test helpers for all stdcheck integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
pub mod generators;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use stdcheck_core::types::Declaration;
use stdcheck_parsers::python::PySource;
use stdcheck_parsers::source::DeclarationSource;
use tempfile::TempDir;

/// A fully documented function that passes every rule.
#[allow(dead_code)]
pub const DOCUMENTED_ADD: &str = r#"def add(a: int, b: int = 0) -> int:
    """Add two numbers.

    Args:
        a (int): the first operand
        b (int, optional): the second operand; defaults to 0

    Returns:
        int: the sum
    """
    return a + b
"#;

/// Create a project directory from a set of files.
///
/// Each entry in `files` is `(relative_path, content)`.
/// Returns (TempDir, project_root). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn create_project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    let project_root = root.to_path_buf();
    (dir, project_root)
}

/// Extract declarations from Python source as if it lived at `path`.
#[allow(dead_code)]
pub fn declarations_at(path: &str, source: &str) -> Vec<Declaration> {
    PySource::new()
        .declarations(Path::new(path), source)
        .expect("source should parse")
        .collect()
}

/// Get path to compiled stdcheck binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn stdcheck_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("stdcheck");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "stdcheck-cli"])
            .status()
            .expect("Failed to build stdcheck");
        assert!(status.success(), "Failed to build stdcheck binary");
    }
    path
}

/// Run `stdcheck <args>` inside `dir` with logging silenced.
#[allow(dead_code)]
pub fn run_stdcheck(dir: &Path, args: &[&str]) -> Output {
    Command::new(stdcheck_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("STDCHECK_LOG")
        .env_remove("STDCHECK_IGNORE_FILE")
        .output()
        .expect("Failed to run stdcheck")
}
