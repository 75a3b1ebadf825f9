//! Application configuration and constants
//!
//! Central identity values used across the application. Game tuning
//! constants (tempo, row spacing) live in `engine::config`.

/// The application name
pub const APP_NAME: &str = "Falling Tiles";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Banner printed by the desktop emulator
pub const EMULATOR_BANNER: &str = "Falling Tiles - Terminal Emulator";
