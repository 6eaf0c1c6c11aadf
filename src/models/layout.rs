//! Single-letter encoding of window-button placement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the window buttons sit, as encoded at the end of a theme name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LayoutLetter {
    /// Buttons on the left
    L,
    /// Buttons on the right
    #[default]
    R,
    /// Close on the left, minimize/maximize on the right (classic Mac)
    M,
    /// Close button only (GNOME)
    G,
}

impl LayoutLetter {
    /// Letter as written in a theme name.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::L => 'L',
            Self::R => 'R',
            Self::M => 'M',
            Self::G => 'G',
        }
    }

    /// Parses a layout letter from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Self::L),
            'R' => Some(Self::R),
            'M' => Some(Self::M),
            'G' => Some(Self::G),
            _ => None,
        }
    }

    /// Directory name used for this layout inside a theme path.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::R => "right",
            Self::L => "left",
            Self::M => "classic_mac",
            Self::G => "gnome",
        }
    }
}

impl fmt::Display for LayoutLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
