//! Shared foundations for the sheet-ui utilities
//!
//! This crate provides:
//! - The error taxonomy shared by every component
//! - Validated, strictly positive delays
//! - TOML configuration with range validation
//! - Per-component log switches and tracing setup

pub mod config;
pub mod delay;
pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use config::{LoggingConfig, RecentsConfig, ThrottleConfig, UiConfig};
pub use delay::Delay;
pub use error::UtilError;
pub use logging::LogSwitches;

/// Common result type used throughout the utilities
pub type Result<T> = std::result::Result<T, UtilError>;
