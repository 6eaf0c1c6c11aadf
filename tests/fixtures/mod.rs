//! Shared test fixtures for library and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use semabe::config::{Config, CONFIG_DIR_ENV};
use semabe::models::{Preferences, WindowControls};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Preferences for `style` with the stock Steel/Opaque tokens on both domains.
pub fn test_preferences(style: &str) -> Preferences {
    Preferences {
        color: "Steel".to_string(),
        transparency: "Opaque".to_string(),
        window_controls: style.to_string(),
        shell_color: "Steel".to_string(),
        shell_transparency: "Opaque".to_string(),
        ..Preferences::default()
    }
}

/// Like [`test_preferences`], with `size` stored in the slot of `style`.
pub fn test_preferences_sized(style: WindowControls, size: &str) -> Preferences {
    let mut prefs = test_preferences(style.as_str());
    prefs.sizes.set(style, size);
    prefs
}

/// Writes `config` into a fresh temporary config directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_config_dir(config: &Config) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    config
        .save_to(&temp_dir.path().join("config.toml"))
        .expect("Failed to write test config");
    temp_dir
}

/// Path to the semabe binary.
pub fn semabe_bin() -> String {
    std::env::var("CARGO_BIN_EXE_semabe").unwrap_or_else(|_| "target/release/semabe".to_string())
}

/// Runs semabe with `args`, using `config_dir` as its config directory.
pub fn run_isolated(args: &[&str], config_dir: &Path) -> Output {
    Command::new(semabe_bin())
        .env(CONFIG_DIR_ENV, config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Parses the stdout of `output` as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON output")
}

/// Reads the config file back from `config_dir`.
pub fn read_config(config_dir: &Path) -> Config {
    Config::load_from(&config_dir.join("config.toml")).expect("Failed to read config back")
}
