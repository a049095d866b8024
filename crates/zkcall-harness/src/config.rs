//! Harness configuration.
//!
//! Defaults give the strictest run: a freshly deployed verifier per
//! scenario and a repeated verification call to check idempotence.
//! Override via environment variables or explicit construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log output format for the `zkcall` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Read `ZKCALL_LOG_FORMAT` (default: `text`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read `ZKCALL_LOG_FORMAT` through an arbitrary variable lookup.
    ///
    /// Only the log format variable is consulted.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup("ZKCALL_LOG_FORMAT") {
            Some(raw) => raw.parse(),
            None => Ok(LogFormat::default()),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Settings for a scenario suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Deploy a new verifier for every scenario instead of sharing one per
    /// circuit.
    pub fresh_verifier: bool,
    /// Verify each calldata twice and require identical answers.
    pub idempotence_check: bool,
    /// Log format for the binary.
    pub log_format: LogFormat,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fresh_verifier: true,
            idempotence_check: true,
            log_format: LogFormat::Text,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ZKCALL_FRESH_VERIFIER` (default: `true`)
    /// - `ZKCALL_IDEMPOTENCE_CHECK` (default: `true`)
    /// - `ZKCALL_LOG_FORMAT`: `text` or `json` (default: `text`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            fresh_verifier: env_bool(&lookup, "ZKCALL_FRESH_VERIFIER", defaults.fresh_verifier)?,
            idempotence_check: env_bool(
                &lookup,
                "ZKCALL_IDEMPOTENCE_CHECK",
                defaults.idempotence_check,
            )?,
            log_format: LogFormat::from_lookup(&lookup)?,
        })
    }
}

fn env_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool(var.to_string(), raw)),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid boolean for {0}: {1:?}")]
    InvalidBool(String, String),
    #[error("invalid log format {0:?} (expected \"text\" or \"json\")")]
    InvalidLogFormat(String),
}
