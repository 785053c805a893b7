use crate::domain::LogLevel;
use crate::fanout::FanOutLogger;
use crate::sink::SharedSink;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable holding a whole TOML configuration document.
pub const CONFIG_ENV: &str = "LOG_FANOUT_CONFIG";
pub const LEVEL_ENV: &str = "LOG_LEVEL";
pub const SHOW_CALLER_ENV: &str = "LOG_SHOW_CALLER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Settings shared by every sink of a fan-out logger.
///
/// Which sinks to attach is up to the application; this only carries the
/// threshold and caller flag that are pushed to all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanOutConfig {
    pub log_level: LogLevel,
    pub show_caller: bool,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            show_caller: false,
        }
    }
}

impl FanOutConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FanOutConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reads `LOG_FANOUT_CONFIG` if set, otherwise `LOG_LEVEL` and
    /// `LOG_SHOW_CALLER` on top of the defaults. A set but blank
    /// `LOG_FANOUT_CONFIG` is rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(document) = std::env::var(CONFIG_ENV) {
            if document.trim().is_empty() {
                return Err(ConfigError::InvalidConfig(format!("{CONFIG_ENV} is set but empty")));
            }
            return Self::from_toml_str(&document);
        }

        let mut config = FanOutConfig::default();
        load_env_var(LEVEL_ENV, &mut config.log_level)?;
        load_env_var(SHOW_CALLER_ENV, &mut config.show_caller)?;
        Ok(config)
    }

    /// Builds a logger over `sinks` (first one primary) and pushes this
    /// configuration to all of them.
    pub fn build<I>(&self, sinks: I) -> FanOutLogger
    where
        I: IntoIterator<Item = SharedSink>,
    {
        sinks
            .into_iter()
            .fold(FanOutLogger::new(), |logger, sink| logger.with_sink(sink))
            .with_level(self.log_level)
            .with_caller(Some(self.show_caller))
    }
}

/// Parses an environment variable into `target`.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .trim()
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}
