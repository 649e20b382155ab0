//! Configuration module
//!
//! Collector and CLI settings read from `TUNER_*` environment variables (a
//! `.env` file is honoured). Command-line flags override these values.

use std::env;
use std::time::Duration;

use crate::error::TunerError;

const DEFAULT_SERVICE_PATTERN: &str = "odoo";
const DEFAULT_SYSTEMCTL_PATH: &str = "systemctl";
const DEFAULT_SHELL_PATH: &str = "/bin/sh";
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TunerConfig {
    /// Explicit unit name; skips discovery when set.
    pub service: Option<String>,
    /// Case-insensitive substring used to discover candidate units.
    pub service_pattern: String,
    pub systemctl_path: String,
    pub shell_path: String,
    pub command_timeout_secs: u64,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            service: None,
            service_pattern: DEFAULT_SERVICE_PATTERN.to_string(),
            systemctl_path: DEFAULT_SYSTEMCTL_PATH.to_string(),
            shell_path: DEFAULT_SHELL_PATH.to_string(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl TunerConfig {
    pub fn from_env() -> Result<Self, TunerError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TunerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let command_timeout_secs = match non_empty("TUNER_COMMAND_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                TunerError::InvalidConfig(format!(
                    "TUNER_COMMAND_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_COMMAND_TIMEOUT_SECS,
        };

        let config = Self {
            service: non_empty("TUNER_SERVICE"),
            service_pattern: non_empty("TUNER_SERVICE_PATTERN")
                .unwrap_or_else(|| DEFAULT_SERVICE_PATTERN.to_string()),
            systemctl_path: non_empty("TUNER_SYSTEMCTL_PATH")
                .unwrap_or_else(|| DEFAULT_SYSTEMCTL_PATH.to_string()),
            shell_path: non_empty("TUNER_SHELL_PATH")
                .unwrap_or_else(|| DEFAULT_SHELL_PATH.to_string()),
            command_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TunerError> {
        if self.service_pattern.trim().is_empty() {
            return Err(TunerError::InvalidConfig(
                "service pattern cannot be empty".to_string(),
            ));
        }
        if self.command_timeout_secs == 0 {
            return Err(TunerError::InvalidConfig(
                "command timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
