//! Error taxonomy
//!
//! Every failure is raised synchronously at the call site and is fixed by
//! changing the call, never by retrying.

use thiserror::Error;

/// Errors raised by the utilities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UtilError {
    /// A construction-time parameter is out of range
    #[error("invalid configuration for {component}: {reason}")]
    InvalidConfiguration {
        component: &'static str,
        reason: String,
    },

    /// A required callable or predicate was not supplied
    #[error("{component} requires a {argument}")]
    NullArgument {
        component: &'static str,
        argument: &'static str,
    },
}

impl UtilError {
    pub fn invalid(component: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            component,
            reason: reason.into(),
        }
    }

    pub fn null(component: &'static str, argument: &'static str) -> Self {
        Self::NullArgument {
            component,
            argument,
        }
    }

    /// True for `InvalidConfiguration`
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    /// True for `NullArgument`
    pub fn is_null_argument(&self) -> bool {
        matches!(self, Self::NullArgument { .. })
    }
}
