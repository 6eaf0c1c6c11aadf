//! Theme resolution command.
//!
//! Prints the names and paths the current preferences resolve to without
//! changing anything.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_BINARY_NAME;
use crate::models::{LayoutLetter, SizeToken};
use crate::services::collaborators::read_preferences;
use crate::services::effects::{plan_cycle, Effect, ResolvedTheme};
use crate::services::{layout_classifier, StaticLayoutSource};
use clap::Args;
use serde::Serialize;

/// Show the theme names and paths for the current preferences
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Button layout to resolve with instead of the configured one
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output of `semabe resolve`.
#[derive(Debug, Serialize)]
struct ResolveOutput {
    effective_size: SizeToken,
    layout: LayoutLetter,
    #[serde(skip_serializing_if = "Option::is_none")]
    correction: Option<String>,
    application: ResolvedTheme,
    shell: ResolvedTheme,
}

impl ResolveArgs {
    /// Execute the resolve command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let prefs = read_preferences(&config, &StaticLayoutSource::new(self.layout.clone()));
        let layout = layout_classifier::classify_opt(prefs.layout());
        let plan = plan_cycle(&prefs);

        let correction = plan.effects.iter().find_map(|effect| match effect {
            Effect::Notify { title, message } => Some(format!("{title} {message}")),
            _ => None,
        });

        let output = ResolveOutput {
            effective_size: plan.effective_size,
            layout,
            correction,
            application: plan.application,
            shell: plan.shell,
        };

        if self.json {
            print_json(&output)?;
        } else {
            output_human_readable(&output);
        }

        Ok(())
    }
}

fn output_human_readable(output: &ResolveOutput) {
    if let Some(correction) = &output.correction {
        eprintln!("Warning: {correction} (run '{APP_BINARY_NAME} apply' to store the fix)");
        eprintln!();
    }

    println!("Effective size: {}", output.effective_size);
    println!("Button layout: {}", output.layout);
    println!();

    for theme in [&output.application, &output.shell] {
        println!("{} theme ({}):", capitalize(theme.domain.label()), theme.style);
        println!("  Name: {}", theme.name);
        println!("  Path: {}", theme.path);
        println!();
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
