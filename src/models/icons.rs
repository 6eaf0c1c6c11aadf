//! Symbolic icon replacement requests.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which group of symbolic icons the icon script works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMode {
    /// Window close/minimize/maximize/restore icons
    Controls,
    /// Expander and pan arrows
    Arrows,
    /// Put every backed-up icon back
    Restore,
}

impl IconMode {
    /// Every mode, in menu order.
    pub const ALL: [Self; 3] = [Self::Controls, Self::Arrows, Self::Restore];

    /// Mode argument passed to the icon script.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Controls => "controls",
            Self::Arrows => "arrows",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for IconMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = s.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == mode)
            .ok_or_else(|| {
                anyhow::anyhow!("Invalid icon mode '{mode}'. Expected one of: controls, arrows, restore")
            })
    }
}

/// One run of the icon script: `<mode> <style> <icon theme>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRequest {
    /// Icon group to replace or restore
    pub mode: IconMode,
    /// Icon style directory, `-` for a restore
    pub style: String,
    /// Icon theme directory the icons are written into
    pub target: String,
}

impl IconRequest {
    /// Script arguments, in order.
    #[must_use]
    pub fn args(&self) -> [&str; 3] {
        [self.mode.as_str(), &self.style, &self.target]
    }
}
