//! End-to-end tests for `semabe resolve` and `semabe classify`.

mod fixtures;
use fixtures::*;

use semabe::config::Config;
use semabe::models::WindowControls;

fn config_with(style: WindowControls, size: &str) -> Config {
    let mut config = Config::new();
    config.application.window_controls = style.as_str().to_string();
    config.sizes.set(style, size);
    config
}

// ============================================================================
// Resolve Command Tests
// ============================================================================

#[test]
fn test_resolve_default_config() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = run_isolated(&["resolve"], temp_dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "Resolve should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Name: Semabe Steel Opaque (legacy)LR"));
    assert!(stdout.contains("Path: semabe/legacy/Semabe Steel Opaque (legacy)"));
}

#[test]
fn test_resolve_json_macos() {
    let temp_dir = temp_config_dir(&config_with(WindowControls::MacOs, "XL"));
    let output = run_isolated(&["resolve", "--json"], temp_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["effective_size"], "XL");
    assert_eq!(result["layout"], "R");
    assert!(result.get("correction").is_none());
    assert_eq!(result["application"]["domain"], "application");
    assert_eq!(result["application"]["style"], "macOS");
    assert_eq!(
        result["application"]["name"],
        "Semabe Steel Opaque (macOS)XLR"
    );
    assert_eq!(
        result["application"]["path"],
        "semabe/macOS/extra-large/Semabe Steel Opaque (macOS)XL"
    );
    assert_eq!(result["shell"]["name"], "Semabe Steel Opaque (macOS)LR");
}

#[test]
fn test_resolve_layout_override() {
    let temp_dir = temp_config_dir(&config_with(WindowControls::Ambiance, "M"));
    let output = run_isolated(
        &["resolve", "--json", "--layout", "close,maximize,minimize:"],
        temp_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["layout"], "L");
    assert_eq!(
        result["application"]["path"],
        "semabe/ambiance/left/medium/Semabe Steel Opaque (ambiance)ML"
    );
}

#[test]
fn test_resolve_reports_correction_without_storing_it() {
    let temp_dir = temp_config_dir(&config_with(WindowControls::Legacy, "XL"));
    let output = run_isolated(&["resolve", "--json"], temp_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["effective_size"], "L");
    assert!(result["correction"]
        .as_str()
        .is_some_and(|text| text.contains("Unsupported size \"XL\" for style \"legacy\"")));

    let config = read_config(temp_dir.path());
    assert_eq!(config.sizes.slot(WindowControls::Legacy), "XL");
}

// ============================================================================
// Classify Command Tests
// ============================================================================

#[test]
fn test_classify_letters() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let cases = [
        ("close,maximize,minimize:", "L"),
        (":minimize,maximize,close", "R"),
        ("close:", "G"),
        ("minimize:maximize,close", "M"),
        ("", "R"),
    ];

    for (layout, expected) in cases {
        let output = run_isolated(&["classify", layout], temp_dir.path());
        assert_eq!(output.status.code(), Some(0), "classify {layout:?} failed");
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            expected,
            "classify {layout:?}"
        );
    }
}

#[test]
fn test_classify_json() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = run_isolated(
        &["classify", "--json", " close:minimize, maximize "],
        temp_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["normalized"], "close:minimize,maximize");
    assert_eq!(result["letter"], "M");
    assert_eq!(result["directory"], "classic_mac");
}
