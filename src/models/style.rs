//! Window-control styles and their per-style tables.
//!
//! Everything that varies by style (which sizes exist, how the theme
//! directory tree is laid out) is expressed as data on [`WindowControls`]
//! so that adding a style means extending the tables, not the callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::size::SizeToken;

/// Visual style of the window buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WindowControls {
    /// Single-size controls
    #[default]
    #[serde(rename = "legacy")]
    Legacy,
    /// Ubuntu Ambiance-like controls
    #[serde(rename = "ambiance")]
    Ambiance,
    /// Traffic-light controls
    #[serde(rename = "macOS")]
    MacOs,
    /// KDE Breeze-like controls
    #[serde(rename = "breeze")]
    Breeze,
    /// Glowing LED controls
    #[serde(rename = "LED")]
    Led,
    /// Zephyr controls
    #[serde(rename = "zephyr")]
    Zephyr,
    /// Human (early Ubuntu) controls
    #[serde(rename = "human")]
    Human,
}

/// How a style's themes are arranged below `semabe/{style}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathLayout {
    /// Themes sit directly in the style directory; names lose size and layout suffix.
    Flat,
    /// One directory per size; names lose the layout letter.
    SizeBucketed,
    /// One directory per layout, then per size; names are kept whole.
    LayoutAndSizeBucketed,
}

impl WindowControls {
    /// Every style, in settings order.
    pub const ALL: [Self; 7] = [
        Self::Legacy,
        Self::Ambiance,
        Self::MacOs,
        Self::Breeze,
        Self::Led,
        Self::Zephyr,
        Self::Human,
    ];

    /// Token used in settings, theme names and paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Ambiance => "ambiance",
            Self::MacOs => "macOS",
            Self::Breeze => "breeze",
            Self::Led => "LED",
            Self::Zephyr => "zephyr",
            Self::Human => "human",
        }
    }

    /// Sizes a theme of this style ships in.
    #[must_use]
    pub const fn allowed_sizes(self) -> &'static [SizeToken] {
        use SizeToken::{L, M, S, XL, XXL};
        match self {
            Self::Legacy => &[L],
            Self::Ambiance => &[M, L],
            Self::MacOs | Self::Breeze => &[S, M, L, XL, XXL],
            Self::Led | Self::Zephyr | Self::Human => &[S, M, L],
        }
    }

    /// Returns true if `size` is shipped for this style.
    #[must_use]
    pub fn allows(self, size: SizeToken) -> bool {
        self.allowed_sizes().contains(&size)
    }

    /// Directory arrangement used for this style's themes.
    #[must_use]
    pub const fn path_layout(self) -> PathLayout {
        match self {
            Self::Legacy => PathLayout::Flat,
            Self::MacOs | Self::Breeze | Self::Human => PathLayout::SizeBucketed,
            Self::Ambiance | Self::Led | Self::Zephyr => PathLayout::LayoutAndSizeBucketed,
        }
    }

    /// Parses a style token, returning `None` for anything unrecognized.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL.into_iter().find(|style| style.as_str() == token)
    }
}

impl fmt::Display for WindowControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowControls {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid window-control style '{}'. Expected one of: legacy, ambiance, macOS, breeze, LED, zephyr, human",
                s.trim()
            )
        })
    }
}
