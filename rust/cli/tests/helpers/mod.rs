//! Shared helpers for CLI integration tests.

use std::path::Path;

/// Captured result of one in-process CLI invocation.
#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = holdem_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

const CONFIG_VARS: [&str; 5] = [
    "HOLDEM_CONFIG",
    "HOLDEM_LIMIT",
    "HOLDEM_TIMEOUT",
    "HOLDEM_SEED",
    "HOLDEM_STARTING_STACK",
];

/// Removes every `HOLDEM_*` configuration variable. Callers must hold the
/// `#[serial]` guard.
#[allow(dead_code)]
pub fn clear_config_env() {
    for key in CONFIG_VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

#[allow(dead_code)]
pub fn set_env(key: &str, value: impl AsRef<std::ffi::OsStr>) {
    unsafe {
        std::env::set_var(key, value);
    }
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}
