//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed fallback values used when a
//! preference is missing or malformed.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Semabe Theme Selector";

/// The binary name of the application (used in command hints).
pub const APP_BINARY_NAME: &str = "semabe";

/// Vendor prefix that starts every theme name.
pub const THEME_VENDOR: &str = "Semabe";

/// Top-level directory under which every theme path lives.
pub const THEME_ROOT: &str = "semabe";

/// Accent color used when none is configured.
pub const DEFAULT_COLOR: &str = "Steel";

/// Transparency variant used when none is configured.
pub const DEFAULT_TRANSPARENCY: &str = "Opaque";
