//! Process-wide settings.
//!
//! Settings are installed once, early, and read everywhere after that.
//! Code that never installs any sees [`HubSettings::default`].

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::SettingsError;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "HUB_LOG";

static SETTINGS: OnceLock<HubSettings> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings shared by everything in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    /// Default log level when `HUB_LOG` is unset.
    pub log_level: LogLevel,
    /// Colour log output.
    pub ansi: bool,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            ansi: true,
        }
    }
}

impl HubSettings {
    /// Loads settings from TOML; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed TOML or unknown values.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        toml::from_str(source).map_err(|e| SettingsError::Parse {
            message: e.to_string(),
        })
    }

    /// Log filter: `HUB_LOG` when set and valid, otherwise `log_level`.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_str()))
    }
}

/// Installs `settings` for the rest of the process.
///
/// # Errors
///
/// Returns [`SettingsError::AlreadyInitialized`] if settings were already
/// installed; the first installation stays in effect.
pub fn install(settings: HubSettings) -> Result<&'static HubSettings, SettingsError> {
    let mut installed = false;
    let current = SETTINGS.get_or_init(|| {
        installed = true;
        settings
    });
    if installed {
        Ok(current)
    } else {
        Err(SettingsError::AlreadyInitialized)
    }
}

/// The installed settings, or the defaults when none were installed.
#[must_use]
pub fn current() -> HubSettings {
    SETTINGS.get().copied().unwrap_or_default()
}

/// Installs a global `tracing` subscriber configured from `settings`.
///
/// # Errors
///
/// Returns [`SettingsError::Subscriber`] when a global subscriber is
/// already set.
pub fn init_tracing(settings: &HubSettings) -> Result<(), SettingsError> {
    tracing_subscriber::fmt()
        .with_env_filter(settings.env_filter())
        .with_ansi(settings.ansi)
        .with_target(true)
        .try_init()
        .map_err(|e| SettingsError::Subscriber {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = HubSettings::default();
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(settings.ansi);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = HubSettings::from_toml_str("log_level = \"debug\"").unwrap();
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert!(settings.ansi);

        let settings = HubSettings::from_toml_str("").unwrap();
        assert_eq!(settings, HubSettings::default());
    }

    #[test]
    fn test_full_toml() {
        let settings = HubSettings::from_toml_str("log_level = \"off\"\nansi = false\n").unwrap();
        assert_eq!(
            settings,
            HubSettings {
                log_level: LogLevel::Off,
                ansi: false
            }
        );
    }

    #[test]
    fn test_bad_toml_rejected() {
        let err = HubSettings::from_toml_str("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(HubSettings::from_toml_str("log_level = ").is_err());
    }

    #[test]
    fn test_install_once() {
        let settings = HubSettings {
            log_level: LogLevel::Warn,
            ansi: false,
        };
        // Other tests in this binary never install, so the first call wins.
        let installed = install(settings).unwrap();
        assert_eq!(*installed, settings);
        assert_eq!(current(), settings);

        let err = install(HubSettings::default()).unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyInitialized));
        assert_eq!(current(), settings);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
