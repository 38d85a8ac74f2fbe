//! Helpers for running the pickgit binary as a subprocess.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Environment variables cleared so runs ignore the developer's settings.
const HERMETIC_ENV: &[&str] = &[
    "PICKGIT_DATABASE_URL",
    "PICKGIT_MIGRATE_DB",
    "PICKGIT_TOKEN",
    "PICKGIT_USERNAME",
    "PICKGIT_API_BASE",
    "PICKGIT_IMAGE_DIR",
    "PICKGIT_IMAGE_BASE_URL",
    "GITHUB_TOKEN",
];

/// Returns the path to the built binary.
pub fn binary_path() -> PathBuf {
    // cargo test builds binaries in target/debug
    let mut path = std::env::current_exe()
        .unwrap_or_else(|error| panic!("failed to get current exe path: {error}"));
    path.pop(); // remove test binary name
    path.pop(); // remove deps
    path.push("pickgit");
    path
}

/// Runs pickgit with `args`, applying `env` on top of a hermetic environment.
///
/// # Panics
///
/// Panics when the binary cannot be executed.
pub fn run_pickgit(args: &[&str], env: &[(&str, Option<&str>)]) -> Output {
    let mut command = Command::new(binary_path());
    command.args(args);

    for key in HERMETIC_ENV {
        command.env_remove(key);
    }

    for (key, value) in env {
        match value {
            Some(env_value) => {
                command.env(key, env_value);
            }
            None => {
                command.env_remove(key);
            }
        }
    }

    command
        .output()
        .unwrap_or_else(|error| panic!("failed to execute binary: {error}"))
}

/// Asserts the run exited successfully, showing stderr otherwise.
///
/// # Panics
///
/// Panics when the process failed.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, got {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Asserts the run failed and reported `expected` on stderr.
///
/// # Panics
///
/// Panics when the process succeeded or stderr lacks `expected`.
pub fn assert_failure_mentions(output: &Output, expected: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !output.status.success(),
        "expected failure, got success\nstderr: {stderr}"
    );
    assert!(
        stderr.contains(expected),
        "expected stderr to mention {expected:?}, got: {stderr}"
    );
}
