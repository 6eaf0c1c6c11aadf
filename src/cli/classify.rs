//! Button layout classification command.

use crate::cli::common::{print_json, CliResult};
use crate::models::LayoutLetter;
use crate::services::layout_classifier;
use clap::Args;
use serde::Serialize;

/// Print the layout letter for a button layout descriptor
#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Button layout descriptor, e.g. "close,maximize,minimize:"
    #[arg(value_name = "LAYOUT", allow_hyphen_values = true)]
    pub layout: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    normalized: String,
    letter: LayoutLetter,
    directory: &'static str,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self) -> CliResult<()> {
        let letter = layout_classifier::classify(&self.layout);

        if self.json {
            print_json(&ClassifyOutput {
                normalized: layout_classifier::normalize(&self.layout),
                letter,
                directory: letter.dir_name(),
            })
        } else {
            println!("{letter}");
            Ok(())
        }
    }
}
