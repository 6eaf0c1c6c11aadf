//! Size tokens and the per-style size preference slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::style::WindowControls;

/// Size variant of a theme, as it appears in a theme name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum SizeToken {
    /// Small
    S,
    /// Medium
    M,
    /// Large, the fallback size
    #[default]
    L,
    /// Extra large
    XL,
    /// Extra-extra large
    XXL,
}

impl SizeToken {
    /// Every size token, smallest first.
    pub const ALL: [Self; 5] = [Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    /// Token as written in a theme name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }

    /// Directory name used for this size inside a theme path.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::S => "small",
            Self::M => "medium",
            Self::L => "large",
            Self::XL => "extra-large",
            Self::XXL => "extra-extra-large",
        }
    }

    /// Splits a trailing size token off `text`.
    ///
    /// Longer tokens are tried first so that `XXL` is never read as `L`.
    /// Returns the remaining prefix and the token, or `None` when `text`
    /// does not end in a size token.
    #[must_use]
    pub fn strip_suffix(text: &str) -> Option<(&str, Self)> {
        [Self::XXL, Self::XL, Self::S, Self::M, Self::L]
            .into_iter()
            .find_map(|size| text.strip_suffix(size.as_str()).map(|rest| (rest, size)))
    }
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeToken {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::XL),
            "XXL" => Ok(Self::XXL),
            other => anyhow::bail!("Invalid size '{other}'. Expected one of S, M, L, XL, XXL"),
        }
    }
}

/// Default raw value of a size slot.
fn default_slot() -> String {
    SizeToken::L.as_str().to_string()
}

/// The size chosen for each window-control style.
///
/// Each style keeps its own slot so switching styles restores the size last
/// picked for that style. Slots hold the raw token from the settings store;
/// an unparsable value is reported verbatim when it gets corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SizePreferences {
    /// Slot for `legacy`
    #[serde(default = "default_slot")]
    pub legacy: String,
    /// Slot for `ambiance`
    #[serde(default = "default_slot")]
    pub ambiance: String,
    /// Slot for `macOS`
    #[serde(default = "default_slot", rename = "macOS")]
    pub mac_os: String,
    /// Slot for `breeze`
    #[serde(default = "default_slot")]
    pub breeze: String,
    /// Slot for `LED`
    #[serde(default = "default_slot", rename = "LED")]
    pub led: String,
    /// Slot for `zephyr`
    #[serde(default = "default_slot")]
    pub zephyr: String,
    /// Slot for `human`
    #[serde(default = "default_slot")]
    pub human: String,
}

impl Default for SizePreferences {
    fn default() -> Self {
        Self {
            legacy: default_slot(),
            ambiance: default_slot(),
            mac_os: default_slot(),
            breeze: default_slot(),
            led: default_slot(),
            zephyr: default_slot(),
            human: default_slot(),
        }
    }
}

impl SizePreferences {
    /// Raw token stored for `style`.
    #[must_use]
    pub fn slot(&self, style: WindowControls) -> &str {
        match style {
            WindowControls::Legacy => &self.legacy,
            WindowControls::Ambiance => &self.ambiance,
            WindowControls::MacOs => &self.mac_os,
            WindowControls::Breeze => &self.breeze,
            WindowControls::Led => &self.led,
            WindowControls::Zephyr => &self.zephyr,
            WindowControls::Human => &self.human,
        }
    }

    /// Mutable access to the slot for `style`.
    pub fn slot_mut(&mut self, style: WindowControls) -> &mut String {
        match style {
            WindowControls::Legacy => &mut self.legacy,
            WindowControls::Ambiance => &mut self.ambiance,
            WindowControls::MacOs => &mut self.mac_os,
            WindowControls::Breeze => &mut self.breeze,
            WindowControls::Led => &mut self.led,
            WindowControls::Zephyr => &mut self.zephyr,
            WindowControls::Human => &mut self.human,
        }
    }

    /// Replaces the slot for `style`.
    pub fn set(&mut self, style: WindowControls, value: impl Into<String>) {
        *self.slot_mut(style) = value.into();
    }
}
