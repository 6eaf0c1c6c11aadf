//! Theme identities, names and paths.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::layout::LayoutLetter;
use super::size::SizeToken;
use super::style::WindowControls;

/// The two theme settings a selection is applied to.
///
/// The domains never share state: each has its own color, transparency and
/// style preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeDomain {
    /// GTK application theme; follows the effective size and button layout
    Application,
    /// Desktop shell theme; always large, always right-hand layout
    Shell,
}

impl ThemeDomain {
    /// Human-readable domain label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Shell => "shell",
        }
    }
}

/// A color or transparency word that is safe to embed in a name, a path or
/// a shell command line.
///
/// Only ASCII letters, digits, `-` and `_` survive, with words separated by
/// a single space. Anything else (quotes, slashes, `$`, control characters)
/// is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeToken(String);

impl ThemeToken {
    /// Sanitizes `raw`, falling back to `default` when nothing usable is left.
    #[must_use]
    pub fn sanitize(raw: &str, default: &str) -> Self {
        let cleaned = raw
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                    .collect::<String>()
            })
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if cleaned.is_empty() {
            Self(default.to_string())
        } else {
            Self(cleaned)
        }
    }

    /// The sanitized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every input that determines one theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeIdentity {
    /// Accent color word
    pub color: ThemeToken,
    /// Transparency word
    pub transparency: ThemeToken,
    /// Window-control style
    pub style: WindowControls,
    /// Effective size
    pub size: SizeToken,
    /// Button placement
    pub layout: LayoutLetter,
}

/// Canonical theme name, e.g. `Semabe Steel Opaque (macOS)XLR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ThemeName(String);

impl ThemeName {
    /// Wraps an already-built name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relative theme directory, e.g. `semabe/macOS/extra-large/Semabe Steel Opaque (macOS)XL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ThemePath(String);

impl ThemePath {
    /// Joins path segments with `/`.
    #[must_use]
    pub fn from_segments(segments: &[&str]) -> Self {
        Self(segments.join("/"))
    }

    /// The path text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
