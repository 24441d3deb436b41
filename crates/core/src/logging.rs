//! Per-component log switches and tracing setup
//!
//! Components receive their switch at construction instead of reading
//! shared flags, so two instances of the same component can log
//! differently.

use crate::config::LoggingConfig;
use crate::{Result, UtilError};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

/// Component name -> debug logging enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSwitches {
    components: BTreeMap<String, bool>,
}

impl LogSwitches {
    /// All components silent
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            components: config.components.clone(),
        }
    }

    /// Builder-style toggle
    pub fn with(mut self, component: &str, enabled: bool) -> Self {
        self.set(component, enabled);
        self
    }

    pub fn set(&mut self, component: &str, enabled: bool) {
        self.components.insert(component.to_string(), enabled);
    }

    /// Unknown components are disabled
    pub fn is_enabled(&self, component: &str) -> bool {
        self.components.get(component).copied().unwrap_or(false)
    }
}

/// Build `EnvFilter` directives for a logging configuration
///
/// The default level comes first, followed by `component=debug` for every
/// enabled component.
pub fn directives(config: &LoggingConfig) -> String {
    let mut parts = vec![config.default_level.to_lowercase()];
    parts.extend(
        config
            .components
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| format!("{}=debug", name)),
    );
    parts.join(",")
}

/// Install a global fmt subscriber for the configuration
///
/// Returns `false` when a subscriber was already installed.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let filter = EnvFilter::try_new(directives(config))
        .map_err(|e| UtilError::invalid("logging", e.to_string()))?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_component_is_disabled() {
        let switches = LogSwitches::new().with("throttle", true);
        assert!(switches.is_enabled("throttle"));
        assert!(!switches.is_enabled("history"));
    }

    #[test]
    fn test_from_config() {
        let mut config = LoggingConfig::default();
        config.components.insert("history".to_string(), true);
        config.components.insert("throttle".to_string(), false);

        let switches = LogSwitches::from_config(&config);
        assert!(switches.is_enabled("history"));
        assert!(!switches.is_enabled("throttle"));
    }

    #[test]
    fn test_directives_only_list_enabled_components() {
        let mut config = LoggingConfig::default();
        config.default_level = "WARN".to_string();
        config.components.insert("history".to_string(), true);
        config.components.insert("throttle".to_string(), false);

        assert_eq!(directives(&config), "warn,history=debug");
    }

    #[test]
    fn test_init_twice_reports_existing_subscriber() {
        let config = LoggingConfig::default();
        init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }
}
