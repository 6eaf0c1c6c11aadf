//! Setting keys and the preference snapshot a resolution cycle works on.

use std::fmt;
use std::str::FromStr;

use super::size::SizePreferences;
use super::style::WindowControls;

/// A single preference the settings store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Application accent color
    Color,
    /// Application transparency
    Transparency,
    /// Application window-control style
    WindowControls,
    /// Shell accent color
    ShellColor,
    /// Shell transparency
    ShellTransparency,
    /// Shell window-control style; empty means "same as the application"
    ShellWindowControls,
    /// Size slot of one style
    Size(WindowControls),
    /// Stored button layout descriptor, used when the desktop reports none
    ButtonLayout,
    /// Style directory for the window-control icons
    ControlsStyle,
    /// Style directory for the arrow icons
    ArrowsStyle,
    /// Icon theme the symbolic icons are written into
    IconTheme,
}

impl SettingKey {
    /// Returns true if a change to this key can alter the effective size.
    #[must_use]
    pub const fn affects_size(self) -> bool {
        matches!(self, Self::WindowControls | Self::Size(_))
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Transparency => f.write_str("transparency"),
            Self::WindowControls => f.write_str("window-controls"),
            Self::ShellColor => f.write_str("shell-color"),
            Self::ShellTransparency => f.write_str("shell-transparency"),
            Self::ShellWindowControls => f.write_str("shell-window-controls"),
            Self::Size(style) => write!(f, "size-{style}"),
            Self::ButtonLayout => f.write_str("button-layout"),
            Self::ControlsStyle => f.write_str("controls-style"),
            Self::ArrowsStyle => f.write_str("arrows-style"),
            Self::IconTheme => f.write_str("icon-theme"),
        }
    }
}

impl FromStr for SettingKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(style) = key.strip_prefix("size-") {
            let style = style
                .parse::<WindowControls>()
                .map_err(|_| anyhow::anyhow!("Unknown size key '{key}'"))?;
            return Ok(Self::Size(style));
        }

        match key {
            "color" => Ok(Self::Color),
            "transparency" => Ok(Self::Transparency),
            "window-controls" => Ok(Self::WindowControls),
            "shell-color" => Ok(Self::ShellColor),
            "shell-transparency" => Ok(Self::ShellTransparency),
            "shell-window-controls" => Ok(Self::ShellWindowControls),
            "button-layout" => Ok(Self::ButtonLayout),
            "controls-style" => Ok(Self::ControlsStyle),
            "arrows-style" => Ok(Self::ArrowsStyle),
            "icon-theme" => Ok(Self::IconTheme),
            _ => anyhow::bail!("Unknown setting '{key}'"),
        }
    }
}

/// Raw preference values, as read from the settings store.
///
/// Values are kept verbatim; interpretation (sanitizing, parsing, fallbacks)
/// happens when a cycle is planned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preferences {
    /// Application accent color
    pub color: String,
    /// Application transparency
    pub transparency: String,
    /// Application window-control style token
    pub window_controls: String,
    /// Shell accent color
    pub shell_color: String,
    /// Shell transparency
    pub shell_transparency: String,
    /// Shell window-control style token, `None` to follow the application
    pub shell_window_controls: Option<String>,
    /// Per-style size slots
    pub sizes: SizePreferences,
    /// Button layout descriptor reported by the desktop
    pub desktop_layout: Option<String>,
    /// Button layout descriptor kept in the settings store
    pub button_layout: Option<String>,
    /// Window-control icon style
    pub controls_style: Option<String>,
    /// Arrow icon style
    pub arrows_style: Option<String>,
    /// Icon theme selected for symbolic icon replacement
    pub icon_theme: Option<String>,
}

impl Preferences {
    /// Application style, `None` if the token is not recognized.
    #[must_use]
    pub fn style(&self) -> Option<WindowControls> {
        WindowControls::parse_token(&self.window_controls)
    }

    /// Shell style: its own token when set, otherwise the application's.
    #[must_use]
    pub fn shell_style(&self) -> Option<WindowControls> {
        match self.shell_window_controls.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => WindowControls::parse_token(token),
            _ => self.style(),
        }
    }

    /// Layout the cycle classifies: the desktop's when it reports one,
    /// otherwise the stored descriptor.
    #[must_use]
    pub fn layout(&self) -> Option<&str> {
        non_blank(self.desktop_layout.as_deref())
            .or_else(|| non_blank(self.button_layout.as_deref()))
    }

    /// Stores `value` under `key`.
    ///
    /// A layout change updates the stored descriptor only; the desktop's
    /// layout still wins in [`Preferences::layout`].
    pub fn apply_change(&mut self, key: SettingKey, value: &str) {
        let optional = || (!value.trim().is_empty()).then(|| value.to_string());
        match key {
            SettingKey::Color => self.color = value.to_string(),
            SettingKey::Transparency => self.transparency = value.to_string(),
            SettingKey::WindowControls => self.window_controls = value.to_string(),
            SettingKey::ShellColor => self.shell_color = value.to_string(),
            SettingKey::ShellTransparency => self.shell_transparency = value.to_string(),
            SettingKey::ShellWindowControls => self.shell_window_controls = optional(),
            SettingKey::Size(style) => self.sizes.set(style, value),
            SettingKey::ButtonLayout => self.button_layout = optional(),
            SettingKey::ControlsStyle => self.controls_style = optional(),
            SettingKey::ArrowsStyle => self.arrows_style = optional(),
            SettingKey::IconTheme => self.icon_theme = optional(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
