//! End-to-end tests for `semabe icons`.
//!
//! The icon script is replaced by a small shell script run with `/bin/sh`.

mod fixtures;
use fixtures::*;

use semabe::config::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a script that records its arguments in `calls` and prints them.
fn recording_script(dir: &Path, body: &str) -> PathBuf {
    let script = dir.join("replace_symbolic_icon.sh");
    let calls = dir.join("calls");
    fs::write(
        &script,
        format!("echo \"$@\" >> '{}'\n{body}\n", calls.display()),
    )
    .expect("Failed to write script");
    script
}

fn calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls"))
        .map(|text| text.lines().map(String::from).collect())
        .unwrap_or_default()
}

fn icons_config() -> Config {
    let mut config = Config::new();
    config.icons.controls_style = Some("round".to_string());
    config.icons.arrows_style = Some("thin".to_string());
    config.icons.theme = Some("Mint-Y".to_string());
    config
}

fn run_icons(
    mode: &str,
    script: &Path,
    extra: &[&str],
    config_dir: &Path,
) -> std::process::Output {
    let script = script.to_string_lossy();
    let mut args = vec!["icons", mode, "--interpreter", "/bin/sh", "--script", &*script];
    args.extend_from_slice(extra);
    run_isolated(&args, config_dir)
}

#[test]
fn test_icons_runs_script_with_mode_style_and_theme() {
    let scripts = TempDir::new().expect("Failed to create temp dir");
    let script = recording_script(scripts.path(), "echo \"Replaced $1 icons in $3\"");
    let temp_dir = temp_config_dir(&icons_config());

    let output = run_icons("controls", &script, &[], temp_dir.path());
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(calls(scripts.path()), ["controls round Mint-Y"]);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Replaced controls icons in Mint-Y"
    );
}

#[test]
fn test_icons_restore_json() {
    let scripts = TempDir::new().expect("Failed to create temp dir");
    let script = recording_script(scripts.path(), "");
    let temp_dir = temp_config_dir(&icons_config());

    let output = run_icons("restore", &script, &["--json"], temp_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["mode"], "restore");
    assert_eq!(result["style"], "-");
    assert_eq!(result["target"], "Mint-Y");
    assert_eq!(result["message"], "Done!");
    assert_eq!(calls(scripts.path()), ["restore - Mint-Y"]);
}

#[test]
fn test_icons_without_theme_does_not_run_script() {
    let scripts = TempDir::new().expect("Failed to create temp dir");
    let script = recording_script(scripts.path(), "");
    let mut config = icons_config();
    config.icons.theme = None;
    let temp_dir = temp_config_dir(&config);

    let output = run_icons("arrows", &script, &[], temp_dir.path());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No icon theme detected or selected!"));
    assert!(calls(scripts.path()).is_empty());
}

#[test]
fn test_icons_script_failure_exits_with_io_code() {
    let scripts = TempDir::new().expect("Failed to create temp dir");
    let script = recording_script(scripts.path(), "echo 'No backup found' >&2\nexit 3");
    let temp_dir = temp_config_dir(&icons_config());

    let output = run_icons("restore", &script, &[], temp_dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Script failed: No backup found"));
}

#[test]
fn test_icons_missing_script() {
    let scripts = TempDir::new().expect("Failed to create temp dir");
    let temp_dir = temp_config_dir(&icons_config());

    let output = run_icons(
        "controls",
        &scripts.path().join("missing.sh"),
        &[],
        temp_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Script not found"));
}

#[test]
fn test_icons_dry_run_only_prints() {
    let scripts = TempDir::new().expect("Failed to create temp dir");
    let script = recording_script(scripts.path(), "");
    let temp_dir = temp_config_dir(&icons_config());

    let output = run_icons("arrows", &script, &["--dry-run"], temp_dir.path());
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would run: /bin/sh"));
    assert!(stdout.contains("arrows thin Mint-Y"));
    assert!(calls(scripts.path()).is_empty());
}

#[test]
fn test_icons_rejects_unknown_mode() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_isolated(&["icons", "everything"], temp_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid icon mode"));
}
