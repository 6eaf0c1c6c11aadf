//! Cinnamon desktop integration through external commands.
//!
//! Themes and the icon theme are switched with `gsettings`; symbolic icons
//! are replaced by the icon script, run with an explicit argument list.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use super::collaborators::{IconScript, IconThemeSource, ScriptOutput, ThemeApplier};
use crate::models::{IconRequest, ThemePath};

/// Schema holding the GTK and icon themes.
pub const INTERFACE_SCHEMA: &str = "org.cinnamon.desktop.interface";

/// Schema holding the Cinnamon shell theme.
pub const SHELL_SCHEMA: &str = "org.cinnamon.theme";

/// Extension directory the icon script ships in, relative to the data dir.
pub const SCRIPT_DIR: &str = "cinnamon/extensions/semabe-theme-selector@sewbej";

/// File name of the icon script.
pub const SCRIPT_NAME: &str = "replace_symbolic_icon.py";

/// Interpreter the icon script runs with unless configured otherwise.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// `gsettings` arguments that select both theme paths.
#[must_use]
pub fn theme_commands(application: &ThemePath, shell: &ThemePath) -> [[String; 4]; 2] {
    [
        set_args(INTERFACE_SCHEMA, "gtk-theme", application.as_str()),
        set_args(SHELL_SCHEMA, "name", shell.as_str()),
    ]
}

/// `gsettings` arguments that make the desktop reload `theme`.
///
/// Selecting the same value again is a no-op, so the key is cleared first.
#[must_use]
pub fn icon_refresh_commands(theme: &str) -> [[String; 4]; 2] {
    [
        set_args(INTERFACE_SCHEMA, "icon-theme", ""),
        set_args(INTERFACE_SCHEMA, "icon-theme", theme),
    ]
}

fn set_args(schema: &str, key: &str, value: &str) -> [String; 4] {
    ["set", schema, key, value].map(String::from)
}

/// Strips the GVariant quoting from a `gsettings get` string value.
#[must_use]
pub fn parse_gsettings_string(output: &str) -> Option<String> {
    let value = output.trim();
    let value = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value);
    (!value.is_empty()).then(|| value.to_string())
}

fn gsettings<S: AsRef<str>>(args: &[S]) -> Result<String> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    debug!(?args, "running gsettings");

    let output = Command::new("gsettings")
        .args(&args)
        .output()
        .context("Failed to execute 'gsettings'")?;
    if !output.status.success() {
        anyhow::bail!(
            "gsettings {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Applier that selects both themes on the running Cinnamon session.
#[derive(Debug, Default)]
pub struct GsettingsApplier;

impl ThemeApplier for GsettingsApplier {
    fn apply(&mut self, application: &ThemePath, shell: &ThemePath) -> Result<()> {
        for args in theme_commands(application, shell) {
            gsettings(&args)?;
        }
        Ok(())
    }
}

/// The session's icon theme, read and reloaded through `gsettings`.
#[derive(Debug, Default)]
pub struct GsettingsIconTheme;

impl IconThemeSource for GsettingsIconTheme {
    fn current(&self) -> Option<String> {
        match gsettings(&["get", INTERFACE_SCHEMA, "icon-theme"]) {
            Ok(output) => parse_gsettings_string(&output),
            Err(e) => {
                debug!("icon theme detection failed: {e:#}");
                None
            }
        }
    }

    fn refresh(&mut self, theme: &str) -> Result<()> {
        for args in icon_refresh_commands(theme) {
            gsettings(&args)?;
        }
        Ok(())
    }
}

/// Runs the icon script with an interpreter: `<interpreter> <script> <mode>
/// <style> <icon theme>`.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    interpreter: PathBuf,
    script: PathBuf,
}

impl ScriptRunner {
    /// Creates a runner for `script`.
    #[must_use]
    pub fn new(interpreter: PathBuf, script: PathBuf) -> Self {
        Self {
            interpreter,
            script,
        }
    }

    /// Where the extension installs the icon script.
    pub fn default_script_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Failed to determine data directory")?;
        Ok(data_dir.join(SCRIPT_DIR).join(SCRIPT_NAME))
    }

    /// Program the script runs with.
    #[must_use]
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Path of the script this runner executes.
    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }
}

impl IconScript for ScriptRunner {
    fn run(&mut self, request: &IconRequest) -> Result<ScriptOutput> {
        if !self.script.is_file() {
            anyhow::bail!("Script not found: {}", self.script.display());
        }

        debug!(script = %self.script.display(), args = ?request.args(), "running icon script");
        let output = Command::new(&self.interpreter)
            .arg(&self.script)
            .args(request.args())
            .output()
            .with_context(|| format!("Failed to execute '{}'", self.interpreter.display()))?;

        Ok(ScriptOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
