//! Commands that run a full theme cycle: `apply` and `change`.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, FileSettings};
use crate::models::SettingKey;
use crate::services::{
    ChangeOutcome, Collaborators, ConsoleNotifier, CyclePlan, FlatpakOverrideApplier,
    GsettingsApplier, IconTools, Notifier, PrintApplier, SettingsStore, StaticLayoutSource,
    ThemeApplier, ThemeEngine,
};
use std::path::PathBuf;
use clap::Args;
use serde_json::json;
use tracing::debug;

/// Resolve the stored preferences and apply the themes
#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Show what would be applied without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Button layout reported by the desktop
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Output the executed plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Store one setting and run the cycle it triggers
#[derive(Debug, Clone, Args)]
pub struct ChangeArgs {
    /// Setting key, e.g. window-controls, size-macOS, shell-color
    #[arg(value_name = "KEY")]
    pub key: String,

    /// New value
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Button layout reported by the desktop
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Output the executed plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl ApplyArgs {
    /// Execute the apply command
    pub fn execute(&self) -> CliResult<()> {
        let (config, path) = load_config()?;
        let engine = build_engine(
            config,
            path,
            EngineOptions {
                layout: self.layout.clone(),
                dry_run: self.dry_run,
                quiet: self.json,
                ..EngineOptions::default()
            },
        );
        if self.dry_run {
            println!("Dry run: no files will be written.");
        }

        let outcome = engine
            .refresh()
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        report(&outcome, self.json)
    }
}

impl ChangeArgs {
    /// Execute the change command
    pub fn execute(&self) -> CliResult<()> {
        let key: SettingKey = self
            .key
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;

        let (config, path) = load_config()?;
        let engine = build_engine(
            config,
            path,
            EngineOptions {
                layout: self.layout.clone(),
                quiet: self.json,
                ..EngineOptions::default()
            },
        );
        let outcome = engine
            .update(key, &self.value)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        report(&outcome, self.json)
    }
}

/// Loads the config file the engine reads and writes.
pub(crate) fn load_config() -> CliResult<(Config, PathBuf)> {
    let path = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to locate configuration: {e:#}")))?;
    let config = Config::load_from(&path)
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
    Ok((config, path))
}

/// How a command wants its engine wired.
#[derive(Default)]
pub(crate) struct EngineOptions {
    /// Button layout reported by the desktop
    pub layout: Option<String>,
    /// Keep settings in memory and skip every applier but printing
    pub dry_run: bool,
    /// No stdout theme lines, no stderr notices
    pub quiet: bool,
    /// Notifier replacing the console one
    pub notifier: Option<Box<dyn Notifier>>,
    /// Icon replacement support
    pub icons: Option<IconTools>,
}

/// Wires the engine to the config file, the console and the configured
/// appliers. A dry run keeps settings in memory and only prints.
pub(crate) fn build_engine(config: Config, path: PathBuf, options: EngineOptions) -> ThemeEngine {
    let mut appliers: Vec<Box<dyn ThemeApplier>> = Vec::new();
    if !options.quiet {
        appliers.push(Box::new(PrintApplier));
    }
    if !options.dry_run {
        if let Some(override_path) = &config.desktop.flatpak_override {
            let applier = FlatpakOverrideApplier::new(override_path.clone());
            debug!(path = %applier.path().display(), "syncing Flatpak override");
            appliers.push(Box::new(applier));
        }
        if config.desktop.gsettings {
            debug!("selecting themes through gsettings");
            appliers.push(Box::new(GsettingsApplier));
        }
    }

    let settings: Box<dyn SettingsStore> = if options.dry_run {
        Box::new(config)
    } else {
        Box::new(FileSettings::new(config, path))
    };
    let notifier = options
        .notifier
        .unwrap_or_else(|| Box::new(ConsoleNotifier::new(options.quiet)));

    ThemeEngine::new(Collaborators {
        settings,
        layout: Box::new(StaticLayoutSource::new(options.layout)),
        notifier,
        applier: Box::new(appliers),
        settings_ui: None,
        icons: options.icons,
    })
}

fn report(outcome: &ChangeOutcome, json: bool) -> CliResult<()> {
    let ChangeOutcome::Applied(plan) = outcome else {
        return Err(CliError::io("Theme cycle did not run"));
    };

    if json {
        print_json(&plan_json(plan))
    } else {
        if plan.corrected() {
            println!("Size corrected to {}.", plan.effective_size);
        }
        Ok(())
    }
}

fn plan_json(plan: &CyclePlan) -> serde_json::Value {
    json!({
        "effective_size": plan.effective_size,
        "corrected": plan.corrected(),
        "application": plan.application,
        "shell": plan.shell,
    })
}
