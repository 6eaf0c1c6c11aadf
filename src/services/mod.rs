//! Service layer for business logic.
//!
//! This module contains the resolution core (size resolution, layout
//! classification, name and path building), the change and icon planners,
//! the desktop command integrations and the
//! dispatcher that executes planned effects against external collaborators.

pub mod collaborators;
pub mod desktop;
pub mod effects;
pub mod engine;
pub mod flatpak;
pub mod icons;
pub mod layout_classifier;
pub mod size_resolver;
pub mod theme_name;
pub mod theme_path;

// Re-export commonly used types and functions
pub use collaborators::{
    ConsoleNotifier, IconScript, IconThemeSource, LayoutSource, Notifier, PrintApplier,
    ScriptOutput, SettingsStore, SettingsUi, StaticIconTheme, StaticLayoutSource, ThemeApplier,
};
pub use desktop::{GsettingsApplier, GsettingsIconTheme, ScriptRunner};
pub use effects::{CyclePlan, Effect, ResolvedTheme};
pub use engine::{ChangeOutcome, Collaborators, IconTools, ThemeEngine};
pub use flatpak::FlatpakOverrideApplier;
pub use icons::IconPlan;
