//! CLI command handlers for Semabe.
//!
//! This module provides headless, scriptable access to theme resolution,
//! button layout classification, symbolic icon replacement and the stored
//! preferences.

pub mod apply;
pub mod classify;
pub mod common;
pub mod config;
pub mod icons;
pub mod resolve;

// Re-export types used by main.rs and tests
pub use apply::{ApplyArgs, ChangeArgs};
pub use classify::ClassifyArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use icons::IconsArgs;
pub use resolve::ResolveArgs;
