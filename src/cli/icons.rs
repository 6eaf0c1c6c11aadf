//! Symbolic icon replacement command.

use crate::cli::apply::{build_engine, load_config, EngineOptions};
use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::IconMode;
use crate::services::collaborators::read_preferences;
use crate::services::desktop::DEFAULT_INTERPRETER;
use crate::services::icons::plan_icons;
use crate::services::{
    GsettingsIconTheme, IconThemeSource, IconTools, Notifier, ScriptRunner, StaticIconTheme,
    StaticLayoutSource,
};
use clap::Args;
use serde_json::json;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{error, info};

/// Replace or restore the symbolic icons of the selected icon theme
#[derive(Debug, Clone, Args)]
pub struct IconsArgs {
    /// What to do: controls, arrows or restore
    #[arg(value_name = "MODE")]
    pub mode: String,

    /// Icon script to run instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Program the script runs with
    #[arg(long, value_name = "PROGRAM")]
    pub interpreter: Option<PathBuf>,

    /// Show the script invocation without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Keeps notices for the command's own output; the engine's notifier goes
/// through here instead of the console.
#[derive(Clone, Default)]
struct Notices(Rc<RefCell<Vec<String>>>);

impl Notices {
    fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }
}

impl Notifier for Notices {
    fn notify(&mut self, title: &str, message: &str) {
        info!(title, message, "notice");
        self.0.borrow_mut().push(message.to_string());
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        error!(title, message, "error notice");
        self.0.borrow_mut().push(message.to_string());
    }
}

impl IconsArgs {
    /// Execute the icons command
    pub fn execute(&self) -> CliResult<()> {
        let mode: IconMode = self
            .mode
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;
        let (config, path) = load_config()?;
        let theme = icon_theme_source(&config);
        let runner = self.runner(&config)?;

        if self.dry_run {
            return self.preview(mode, &config, theme.as_ref(), &runner);
        }

        let notices = Notices::default();
        let engine = build_engine(
            config,
            path,
            EngineOptions {
                quiet: true,
                notifier: Some(Box::new(notices.clone())),
                icons: Some(IconTools {
                    theme,
                    script: Box::new(runner.clone()),
                }),
                ..EngineOptions::default()
            },
        );

        let plan = engine
            .run_icons(mode)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        let Some(request) = plan.request.clone() else {
            let reason = plan.rejection().unwrap_or("Icon request rejected");
            return Err(CliError::validation(reason));
        };
        let message = notices.last().unwrap_or_default();

        if self.json {
            print_json(&json!({
                "mode": request.mode,
                "style": request.style,
                "target": request.target,
                "script": runner.script().display().to_string(),
                "message": message,
            }))
        } else {
            println!("{message}");
            Ok(())
        }
    }

    fn runner(&self, config: &Config) -> CliResult<ScriptRunner> {
        let script = match self.script.clone().or_else(|| config.icons.script.clone()) {
            Some(script) => script,
            None => ScriptRunner::default_script_path()
                .map_err(|e| CliError::io(format!("{e:#}")))?,
        };
        let interpreter = self
            .interpreter
            .clone()
            .or_else(|| config.icons.interpreter.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INTERPRETER));
        Ok(ScriptRunner::new(interpreter, script))
    }

    /// Plans the run from the stored settings and prints it.
    fn preview(
        &self,
        mode: IconMode,
        config: &Config,
        theme: &dyn IconThemeSource,
        runner: &ScriptRunner,
    ) -> CliResult<()> {
        let prefs = read_preferences(config, &StaticLayoutSource::default());
        let plan = plan_icons(mode, &prefs, theme.current().as_deref());
        let Some(request) = plan.request.as_ref() else {
            let reason = plan.rejection().unwrap_or("Icon request rejected");
            return Err(CliError::validation(reason));
        };

        if self.json {
            print_json(&json!({
                "mode": request.mode,
                "style": request.style,
                "target": request.target,
                "script": runner.script().display().to_string(),
                "dry_run": true,
            }))
        } else {
            println!("Dry run: the icon script will not be started.");
            println!(
                "Would run: {} {} {}",
                runner.interpreter().display(),
                runner.script().display(),
                request.args().join(" ")
            );
            Ok(())
        }
    }
}

/// The desktop's icon theme when gsettings integration is enabled;
/// otherwise only the configured theme is used.
fn icon_theme_source(config: &Config) -> Box<dyn IconThemeSource> {
    if config.desktop.gsettings {
        Box::new(GsettingsIconTheme)
    } else {
        Box::new(StaticIconTheme::new(None))
    }
}
