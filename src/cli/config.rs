//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_BINARY_NAME;
use crate::models::{SizeToken, WindowControls};
use crate::services::FlatpakOverrideApplier;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Application theme accent color
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,

    /// Application theme transparency
    #[arg(long, value_name = "TRANSPARENCY")]
    transparency: Option<String>,

    /// Window-control style (legacy, ambiance, macOS, breeze, LED, zephyr, human)
    #[arg(long, value_name = "STYLE")]
    style: Option<String>,

    /// Size for one style, e.g. macOS=XL (repeatable)
    #[arg(long, value_name = "STYLE=SIZE")]
    size: Vec<String>,

    /// Shell theme accent color
    #[arg(long, value_name = "COLOR")]
    shell_color: Option<String>,

    /// Shell theme transparency
    #[arg(long, value_name = "TRANSPARENCY")]
    shell_transparency: Option<String>,

    /// Shell window-control style, or "follow" to use the application style
    #[arg(long, value_name = "STYLE")]
    shell_style: Option<String>,

    /// Button layout descriptor used when the desktop reports none
    #[arg(long, value_name = "LAYOUT")]
    button_layout: Option<String>,

    /// Flatpak override file to keep in sync (absolute path, or "default"
    /// for the per-user global override)
    #[arg(long, value_name = "FILE")]
    flatpak_override: Option<PathBuf>,

    /// Select themes on the running session through gsettings
    #[arg(long, value_name = "BOOL")]
    gsettings: Option<bool>,

    /// Style directory for the window-control icons
    #[arg(long, value_name = "STYLE")]
    controls_style: Option<String>,

    /// Style directory for the arrow icons
    #[arg(long, value_name = "STYLE")]
    arrows_style: Option<String>,

    /// Icon theme the symbolic icons are written into, or "detect" to use
    /// the desktop's current icon theme
    #[arg(long, value_name = "THEME")]
    icon_theme: Option<String>,

    /// Icon script to run (absolute path)
    #[arg(long, value_name = "FILE")]
    icon_script: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.transparency.is_none()
            && self.style.is_none()
            && self.size.is_empty()
            && self.shell_color.is_none()
            && self.shell_transparency.is_none()
            && self.shell_style.is_none()
            && self.button_layout.is_none()
            && self.flatpak_override.is_none()
            && self.gsettings.is_none()
            && self.controls_style.is_none()
            && self.arrows_style.is_none()
            && self.icon_theme.is_none()
            && self.icon_script.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(format!(
                "At least one configuration option must be specified. Run '{APP_BINARY_NAME} config set --help' for the list"
            )));
        }

        let mut config = Config::load().unwrap_or_default();
        self.apply_to(&mut config)?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }

    /// Validates the requested values and writes them into `config`.
    fn apply_to(&self, config: &mut Config) -> CliResult<()> {
        if let Some(color) = &self.color {
            config.application.color = non_empty("color", color)?;
        }
        if let Some(transparency) = &self.transparency {
            config.application.transparency = non_empty("transparency", transparency)?;
        }
        if let Some(style) = &self.style {
            config.application.window_controls = parse_style(style)?.as_str().to_string();
        }
        for entry in &self.size {
            let (style, size) = parse_size_entry(entry)?;
            config.sizes.set(style, size.as_str());
        }
        if let Some(color) = &self.shell_color {
            config.shell.color = non_empty("shell color", color)?;
        }
        if let Some(transparency) = &self.shell_transparency {
            config.shell.transparency = non_empty("shell transparency", transparency)?;
        }
        if let Some(style) = &self.shell_style {
            config.shell.window_controls = if style.trim() == "follow" {
                None
            } else {
                Some(parse_style(style)?.as_str().to_string())
            };
        }
        if let Some(layout) = &self.button_layout {
            config.desktop.button_layout = Some(layout.trim().to_string());
        }
        if let Some(path) = &self.flatpak_override {
            let path = if path.as_os_str() == "default" {
                FlatpakOverrideApplier::default_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?
            } else {
                path.clone()
            };
            if !path.is_absolute() {
                return Err(CliError::validation(format!(
                    "Flatpak override path must be absolute: {}",
                    path.display()
                )));
            }
            config.desktop.flatpak_override = Some(path);
        }
        if let Some(enabled) = self.gsettings {
            config.desktop.gsettings = enabled;
        }
        if let Some(style) = &self.controls_style {
            config.icons.controls_style = Some(directory_name("controls style", style)?);
        }
        if let Some(style) = &self.arrows_style {
            config.icons.arrows_style = Some(directory_name("arrows style", style)?);
        }
        if let Some(theme) = &self.icon_theme {
            config.icons.theme = if theme.trim() == "detect" {
                None
            } else {
                Some(directory_name("icon theme", theme)?)
            };
        }
        if let Some(path) = &self.icon_script {
            if !path.is_absolute() {
                return Err(CliError::validation(format!(
                    "Icon script path must be absolute: {}",
                    path.display()
                )));
            }
            config.icons.script = Some(path.clone());
        }
        Ok(())
    }
}

fn non_empty(what: &str, value: &str) -> CliResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::validation(format!("The {what} must not be empty")));
    }
    Ok(value.to_string())
}

/// A value used as a single directory name below the icon directories.
fn directory_name(what: &str, value: &str) -> CliResult<String> {
    let value = non_empty(what, value)?;
    if value == "." || value == ".." || value.contains('/') {
        return Err(CliError::validation(format!(
            "The {what} must be a single directory name, got '{value}'"
        )));
    }
    Ok(value)
}

fn parse_style(value: &str) -> CliResult<WindowControls> {
    value
        .parse::<WindowControls>()
        .map_err(|e| CliError::validation(e.to_string()))
}

/// Parses `STYLE=SIZE`, rejecting sizes the style does not ship in.
fn parse_size_entry(entry: &str) -> CliResult<(WindowControls, SizeToken)> {
    let (style, size) = entry.split_once('=').ok_or_else(|| {
        CliError::validation(format!("Invalid size entry '{entry}'. Expected STYLE=SIZE, e.g. macOS=XL"))
    })?;

    let style = parse_style(style)?;
    let size = size
        .parse::<SizeToken>()
        .map_err(|e| CliError::validation(e.to_string()))?;

    if !style.allows(size) {
        let allowed: Vec<_> = style.allowed_sizes().iter().map(|size| size.as_str()).collect();
        return Err(CliError::validation(format!(
            "Size {size} is not available for style {style}. Available: {}",
            allowed.join(", ")
        )));
    }

    Ok((style, size))
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Semabe Configuration");
    println!("====================");
    println!();

    println!("Application theme:");
    println!("  Color: {}", config.application.color);
    println!("  Transparency: {}", config.application.transparency);
    println!("  Window controls: {}", config.application.window_controls);
    println!();

    println!("Shell theme:");
    println!("  Color: {}", config.shell.color);
    println!("  Transparency: {}", config.shell.transparency);
    match &config.shell.window_controls {
        Some(style) => println!("  Window controls: {style}"),
        None => println!("  Window controls: (same as application)"),
    }
    println!();

    println!("Sizes:");
    for style in WindowControls::ALL {
        println!("  {}: {}", style, config.sizes.slot(style));
    }
    println!();

    println!("Desktop:");
    match &config.desktop.button_layout {
        Some(layout) => println!("  Button layout: {layout}"),
        None => println!("  Button layout: (not configured)"),
    }
    match &config.desktop.flatpak_override {
        Some(path) => println!("  Flatpak override: {}", path.display()),
        None => println!("  Flatpak override: (not configured)"),
    }
    println!(
        "  gsettings: {}",
        if config.desktop.gsettings { "enabled" } else { "disabled" }
    );
    println!();

    let unset = |value: &Option<String>, fallback: &str| {
        value.clone().unwrap_or_else(|| format!("({fallback})"))
    };
    println!("Icons:");
    println!("  Controls style: {}", unset(&config.icons.controls_style, "not configured"));
    println!("  Arrows style: {}", unset(&config.icons.arrows_style, "not configured"));
    println!("  Icon theme: {}", unset(&config.icons.theme, "detect from desktop"));
    match &config.icons.script {
        Some(path) => println!("  Script: {}", path.display()),
        None => println!("  Script: (installed with the extension)"),
    }
    println!();
}
