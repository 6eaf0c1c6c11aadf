//! Semabe Theme Selector - resolves and applies Semabe GTK and shell themes
//!
//! Reads the stored theme preferences, resolves the theme names and paths
//! for the current button layout and hands them to the configured appliers.
//! Also drives the symbolic icon replacement script.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use semabe::cli::{
    ApplyArgs, ChangeArgs, ClassifyArgs, CliResult, ConfigArgs, IconsArgs, ResolveArgs,
};
use semabe::constants::APP_NAME;

/// Semabe Theme Selector - resolve and apply Semabe themes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the theme names and paths for the current preferences
    Resolve(ResolveArgs),
    /// Print the layout letter for a button layout descriptor
    Classify(ClassifyArgs),
    /// Resolve the stored preferences and apply the themes
    Apply(ApplyArgs),
    /// Store one setting and run the cycle it triggers
    Change(ChangeArgs),
    /// Replace or restore the symbolic icons of the selected icon theme
    Icons(IconsArgs),
    /// Configuration management
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Resolve(args) => args.execute(),
            Self::Classify(args) => args.execute(),
            Self::Apply(args) => args.execute(),
            Self::Change(args) => args.execute(),
            Self::Icons(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code.code());
    }
}
