//! Flatpak global override support.
//!
//! Sandboxed apps do not see `~/.themes` and ignore the desktop GTK theme
//! unless the global override grants the theme directories and sets
//! `GTK_THEME`. This applier keeps those two entries in sync with the
//! application theme path and leaves every other line of the file alone.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::collaborators::ThemeApplier;
use crate::models::ThemePath;

/// Directories granted to every Flatpak app.
pub const THEME_FILESYSTEMS: &str = "~/.themes;/usr/share/themes";

/// Rewrites override file `content` so that it points at `gtk_theme`.
///
/// Existing `filesystems=` and `GTK_THEME=` lines are replaced in place.
/// A missing entry is added to its section (`[Context]` or
/// `[Environment]`), which is created when absent.
#[must_use]
pub fn rewrite_override(content: &str, gtk_theme: &ThemePath) -> String {
    let filesystems = format!("filesystems={THEME_FILESYSTEMS}");
    let theme = format!("GTK_THEME={gtk_theme}");

    let mut saw_filesystems = false;
    let mut saw_theme = false;
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            if line.starts_with("filesystems=") {
                saw_filesystems = true;
                filesystems.clone()
            } else if line.starts_with("GTK_THEME=") {
                saw_theme = true;
                theme.clone()
            } else {
                line.to_string()
            }
        })
        .collect();

    if !saw_filesystems {
        insert_into_section(&mut lines, "[Context]", filesystems);
    }
    if !saw_theme {
        insert_into_section(&mut lines, "[Environment]", theme);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn insert_into_section(lines: &mut Vec<String>, header: &str, entry: String) {
    let Some(start) = lines.iter().position(|line| line.trim() == header) else {
        if lines.last().is_some_and(|line| !line.trim().is_empty()) {
            lines.push(String::new());
        }
        lines.push(header.to_string());
        lines.push(entry);
        return;
    };

    let end = lines[start + 1..]
        .iter()
        .position(|line| line.trim_start().starts_with('['))
        .map_or(lines.len(), |offset| start + 1 + offset);

    // Keep blank separator lines after the entry
    let mut at = end;
    while at > start + 1 && lines[at - 1].trim().is_empty() {
        at -= 1;
    }
    lines.insert(at, entry);
}

/// Applier that rewrites a Flatpak override file.
#[derive(Debug, Clone)]
pub struct FlatpakOverrideApplier {
    path: PathBuf,
}

impl FlatpakOverrideApplier {
    /// Creates an applier for the override file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default per-user global override file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Failed to determine data directory")?
            .join("flatpak")
            .join("overrides")
            .join("global"))
    }

    /// Path of the override file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeApplier for FlatpakOverrideApplier {
    /// Uses temp file + rename so the override is never left half-written.
    fn apply(&mut self, application: &ThemePath, _shell: &ThemePath) -> Result<()> {
        let current = if self.path.exists() {
            fs::read_to_string(&self.path).with_context(|| {
                format!("Failed to read Flatpak override: {}", self.path.display())
            })?
        } else {
            String::new()
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create override directory: {}", parent.display())
            })?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, rewrite_override(&current, application)).with_context(|| {
            format!("Failed to write temp override file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to rename temp override file to: {}", self.path.display())
        })?;

        debug!(path = %self.path.display(), "flatpak override updated");
        Ok(())
    }
}
