//! Data models for preferences, styles, sizes, button layouts and themes.
//!
//! This module contains the core value types used throughout the application.
//! Models are independent of settings storage and of how themes get applied.

pub mod icons;
pub mod layout;
pub mod preferences;
pub mod size;
pub mod style;
pub mod theme;

// Re-export all model types
pub use icons::{IconMode, IconRequest};
pub use layout::LayoutLetter;
pub use preferences::{Preferences, SettingKey};
pub use size::{SizePreferences, SizeToken};
pub use style::{PathLayout, WindowControls};
pub use theme::{ThemeDomain, ThemeIdentity, ThemeName, ThemePath, ThemeToken};
