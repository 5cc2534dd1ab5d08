//! Error types for hub-domain.
//!
//! The generic property mapper, the path utilities and the schema
//! migrations never fail: absent or malformed data is skipped. Errors only
//! surface at the typed edges (building a [`HubEvent`](crate::events::HubEvent)
//! from a mapped tree, loading settings, waiting on a poll).

use thiserror::Error;

/// Errors raised while converting between store records and typed entities.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Failed to convert {entity} between store and entity shape: {message}")]
    Conversion {
        entity: &'static str,
        message: String,
    },
}

impl MappingError {
    /// Wraps a serde failure for the named entity type.
    #[must_use]
    pub fn conversion(entity: &'static str, err: &serde_json::Error) -> Self {
        Self::Conversion {
            entity,
            message: err.to_string(),
        }
    }
}

/// Errors raised while loading or installing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {message}")]
    Parse {
        message: String,
    },

    #[error("Settings have already been installed")]
    AlreadyInitialized,

    #[error("Failed to install log subscriber: {message}")]
    Subscriber {
        message: String,
    },
}

/// Errors raised by the polling helper.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Polling timed out after {attempts} attempts ({waited_ms}ms waited)")]
    Timeout {
        attempts: u32,
        waited_ms: u64,
    },

    #[error("Polled request failed: {message}")]
    Request {
        message: String,
    },
}

/// Top-level error type for hub-domain.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Poll error: {0}")]
    Poll(#[from] PollError),
}

impl HubError {
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    #[must_use]
    pub const fn is_settings(&self) -> bool {
        matches!(self, Self::Settings(_))
    }

    #[must_use]
    pub const fn is_poll(&self) -> bool {
        matches!(self, Self::Poll(_))
    }

    /// Returns true if retrying the same call could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Poll(e) => matches!(e, PollError::Timeout { .. }),
            Self::Mapping(_) | Self::Settings(_) => false,
        }
    }
}

/// Result type alias for hub-domain operations.
pub type HubResult<T> = Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_conversion() {
        let serde_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = MappingError::conversion("HubEvent", &serde_err);
        let msg = format!("{err}");
        assert!(msg.contains("HubEvent"));
        assert!(msg.contains("store and entity"));
    }

    #[test]
    fn test_poll_timeout_message() {
        let err = PollError::Timeout {
            attempts: 4,
            waited_ms: 18000,
        };
        let msg = format!("{err}");
        assert!(msg.contains("4 attempts"));
        assert!(msg.contains("18000ms"));
    }

    #[test]
    fn test_hub_error_from_mapping() {
        let serde_err = serde_json::from_str::<u32>("x").unwrap_err();
        let err: HubError = MappingError::conversion("HubEvent", &serde_err).into();
        assert!(err.is_mapping());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_hub_error_from_settings() {
        let err: HubError = SettingsError::AlreadyInitialized.into();
        assert!(err.is_settings());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_hub_error_retryable() {
        let timeout: HubError = PollError::Timeout {
            attempts: 1,
            waited_ms: 0,
        }
        .into();
        assert!(timeout.is_poll());
        assert!(timeout.is_retryable());

        let request: HubError = PollError::Request {
            message: "500".to_string(),
        }
        .into();
        assert!(!request.is_retryable());
    }
}
