//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving the theme preferences
//! in TOML format with platform-specific directory resolution. The config
//! file doubles as the settings store the resolution engine reads from.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_COLOR, DEFAULT_TRANSPARENCY};
use crate::models::{SettingKey, SizePreferences, WindowControls};
use crate::services::SettingsStore;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "SEMABE_CONFIG_DIR";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_transparency() -> String {
    DEFAULT_TRANSPARENCY.to_string()
}

fn default_window_controls() -> String {
    WindowControls::default().as_str().to_string()
}

/// Application (GTK) theme preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Accent color (e.g., "Steel")
    #[serde(default = "default_color")]
    pub color: String,
    /// Transparency variant (e.g., "Opaque")
    #[serde(default = "default_transparency")]
    pub transparency: String,
    /// Window-control style token (e.g., "macOS")
    #[serde(default = "default_window_controls")]
    pub window_controls: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            transparency: default_transparency(),
            window_controls: default_window_controls(),
        }
    }
}

/// Shell theme preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Accent color
    #[serde(default = "default_color")]
    pub color: String,
    /// Transparency variant
    #[serde(default = "default_transparency")]
    pub transparency: String,
    /// Window-control style; unset means "same as the application theme"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_controls: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            transparency: default_transparency(),
            window_controls: None,
        }
    }
}

/// Desktop integration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DesktopConfig {
    /// Button layout descriptor (e.g., "close,maximize,minimize:")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_layout: Option<String>,
    /// Flatpak global override file kept in sync with the application theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flatpak_override: Option<PathBuf>,
    /// Select the themes on the running session through `gsettings`
    #[serde(default)]
    pub gsettings: bool,
}

/// Symbolic icon replacement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IconsConfig {
    /// Style directory for the window-control icons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_style: Option<String>,
    /// Style directory for the arrow icons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrows_style: Option<String>,
    /// Icon theme the icons are written into; detected from the desktop
    /// and remembered when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Icon script, defaults to the copy installed with the extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
    /// Interpreter the script runs with, defaults to `python3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Semabe/config.toml`
/// - macOS: `~/Library/Application Support/Semabe/config.toml`
/// - Windows: `%APPDATA%\Semabe\config.toml`
///
/// `SEMABE_CONFIG_DIR` replaces the directory part.
///
/// # Validation
///
/// - `flatpak_override` must be an absolute path
/// - `icons.script` must be an absolute path
///
/// Style and size values are stored verbatim; bad values are repaired by the
/// resolution cycle rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Application theme preferences
    #[serde(default)]
    pub application: ApplicationConfig,
    /// Shell theme preferences
    #[serde(default)]
    pub shell: ShellConfig,
    /// Size chosen for each window-control style
    #[serde(default)]
    pub sizes: SizePreferences,
    /// Desktop integration
    #[serde(default)]
    pub desktop: DesktopConfig,
    /// Symbolic icon replacement
    #[serde(default)]
    pub icons: IconsConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `SEMABE_CONFIG_DIR` when set, otherwise the platform config
    /// directory joined with `Semabe`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Semabe");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `config_path`, defaulting when it is absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `config_path` using temp file + rename.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        debug!(path = %config_path.display(), "config saved");
        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.desktop.flatpak_override {
            if !path.is_absolute() {
                anyhow::bail!(
                    "Flatpak override path must be absolute: {}",
                    path.display()
                );
            }
        }
        if let Some(path) = &self.icons.script {
            if !path.is_absolute() {
                anyhow::bail!("Icon script path must be absolute: {}", path.display());
            }
        }

        Ok(())
    }
}

impl SettingsStore for Config {
    fn get(&self, key: SettingKey) -> Option<String> {
        match key {
            SettingKey::Color => Some(self.application.color.clone()),
            SettingKey::Transparency => Some(self.application.transparency.clone()),
            SettingKey::WindowControls => Some(self.application.window_controls.clone()),
            SettingKey::ShellColor => Some(self.shell.color.clone()),
            SettingKey::ShellTransparency => Some(self.shell.transparency.clone()),
            SettingKey::ShellWindowControls => self.shell.window_controls.clone(),
            SettingKey::Size(style) => Some(self.sizes.slot(style).to_string()),
            SettingKey::ButtonLayout => self.desktop.button_layout.clone(),
            SettingKey::ControlsStyle => self.icons.controls_style.clone(),
            SettingKey::ArrowsStyle => self.icons.arrows_style.clone(),
            SettingKey::IconTheme => self.icons.theme.clone(),
        }
    }

    fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        let optional = |value: &str| (!value.trim().is_empty()).then(|| value.to_string());
        let value = value.to_string();
        match key {
            SettingKey::Color => self.application.color = value,
            SettingKey::Transparency => self.application.transparency = value,
            SettingKey::WindowControls => self.application.window_controls = value,
            SettingKey::ShellColor => self.shell.color = value,
            SettingKey::ShellTransparency => self.shell.transparency = value,
            SettingKey::ShellWindowControls => self.shell.window_controls = optional(&value),
            SettingKey::Size(style) => self.sizes.set(style, value),
            SettingKey::ButtonLayout => self.desktop.button_layout = optional(&value),
            SettingKey::ControlsStyle => self.icons.controls_style = optional(&value),
            SettingKey::ArrowsStyle => self.icons.arrows_style = optional(&value),
            SettingKey::IconTheme => self.icons.theme = optional(&value),
        }
        Ok(())
    }
}

/// Settings store that writes every change through to a config file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    config: Config,
    path: PathBuf,
}

impl FileSettings {
    /// Wraps `config`, persisting changes to `path`.
    #[must_use]
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self { config, path }
    }

    /// Loads the config file at the default location.
    pub fn open() -> Result<Self> {
        let path = Config::config_file_path()?;
        Ok(Self::new(Config::load_from(&path)?, path))
    }

    /// The in-memory configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.config.get(key)
    }

    fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        self.config.set(key, value)?;
        self.config
            .save_to(&self.path)
            .with_context(|| format!("Failed to persist setting '{key}'"))
    }
}
