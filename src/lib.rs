//! Semabe theme selector library
//!
//! This library resolves user preferences (accent color, transparency,
//! window-control style, size and the desktop's button layout) into the
//! Semabe theme names and directory paths for the application and shell
//! themes, and drives the change cycle that applies them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
