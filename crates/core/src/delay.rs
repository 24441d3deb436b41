//! Strictly positive delays

use crate::{Result, UtilError};
use std::time::Duration;

const COMPONENT: &str = "delay";

/// A strictly positive duration, checked once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Delay(Duration);

impl Delay {
    /// Build a delay from signed milliseconds
    ///
    /// Zero and negative values are rejected.
    pub fn from_millis(ms: i64) -> Result<Self> {
        if ms <= 0 {
            return Err(UtilError::invalid(
                COMPONENT,
                format!("delay must be positive, got {}ms", ms),
            ));
        }
        Ok(Self(Duration::from_millis(ms as u64)))
    }

    /// The delay as a `Duration`
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whole milliseconds in the delay
    pub fn as_millis(&self) -> u128 {
        self.0.as_millis()
    }
}

impl TryFrom<Duration> for Delay {
    type Error = UtilError;

    fn try_from(duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(UtilError::invalid(COMPONENT, "delay must be positive, got 0ms"));
        }
        Ok(Self(duration))
    }
}

impl From<Delay> for Duration {
    fn from(delay: Delay) -> Self {
        delay.0
    }
}
