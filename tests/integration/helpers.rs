//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Directory holding the sample exports.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Contents of a fixture file.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// The binary, isolated in `home`: its config file lives there and reports
/// are written there unless `-o` says otherwise.
pub fn filtrapx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("filtrapx").expect("binary is built");
    cmd.current_dir(home)
        .env("FILTRAPX_CONFIG", home.join("config.toml"))
        .env_remove("FILTRAPX_LOG");
    cmd
}
