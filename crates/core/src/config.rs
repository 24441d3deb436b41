//! TOML configuration for the utilities
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.

use crate::{Result, UtilError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Accepted delay range in milliseconds
pub const DELAY_RANGE_MS: std::ops::RangeInclusive<i64> = 1..=60_000;

/// Accepted recents capacity range
pub const CAPACITY_RANGE: std::ops::RangeInclusive<i64> = 1..=1_000;

/// Top level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub throttle: ThrottleConfig,

    #[serde(default)]
    pub recents: RecentsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Debounce scheduler settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Quiet period before the last submitted action fires (default: 500)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: i64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

/// Recently used history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentsConfig {
    /// Maximum number of retained tokens (default: 5)
    #[serde(default = "default_capacity")]
    pub capacity: i64,
}

impl Default for RecentsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for everything not listed in `components` (default: info)
    #[serde(default = "default_level")]
    pub default_level: String,

    /// Component name -> debug logging enabled
    #[serde(default)]
    pub components: BTreeMap<String, bool>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            components: BTreeMap::new(),
        }
    }
}

fn default_delay_ms() -> i64 {
    500
}

fn default_capacity() -> i64 {
    5
}

fn default_level() -> String {
    "info".to_string()
}

impl UiConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: UiConfig = toml::from_str(text).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate and write configuration to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let text = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Check every value against its accepted range
    pub fn validate(&self) -> Result<()> {
        if !DELAY_RANGE_MS.contains(&self.throttle.delay_ms) {
            return Err(UtilError::invalid(
                "config",
                format!(
                    "throttle.delay_ms must be within {}-{}, got {}",
                    DELAY_RANGE_MS.start(),
                    DELAY_RANGE_MS.end(),
                    self.throttle.delay_ms
                ),
            ));
        }

        if !CAPACITY_RANGE.contains(&self.recents.capacity) {
            return Err(UtilError::invalid(
                "config",
                format!(
                    "recents.capacity must be within {}-{}, got {}",
                    CAPACITY_RANGE.start(),
                    CAPACITY_RANGE.end(),
                    self.recents.capacity
                ),
            ));
        }

        if tracing::Level::from_str(&self.logging.default_level).is_err() {
            return Err(UtilError::invalid(
                "config",
                format!(
                    "logging.default_level must be one of trace, debug, info, warn, error; got '{}'",
                    self.logging.default_level
                ),
            ));
        }

        Ok(())
    }
}

/// Commented sample configuration
pub fn example_config() -> &'static str {
    r#"# sheet-ui utilities configuration

[throttle]
# Quiet period in milliseconds before the last submitted action runs (1-60000)
delay_ms = 500

[recents]
# Number of recently used tokens to remember (1-1000)
capacity = 5

[logging]
# Level for everything not listed below
default_level = "info"

[logging.components]
# Per-component debug logging
throttle = false
history = false
"#
}
