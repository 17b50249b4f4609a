//! Config extender trait and errors

use std::path::PathBuf;

use crate::env::EnvMap;
use crate::resolver::SecretError;

use super::model::Configuration;

/// Applies overrides to a default configuration
///
/// Implementations:
/// - `IdentityExtender`: Returns the defaults unchanged
/// - `EnvConfigExtender`: `COUNTLY_CONFIG_*` environment overrides
/// - `FileConfigExtender`: YAML overlay file
/// - `ChainExtender`: Several of the above, in order
///
/// Any `Fn(&str, Configuration, &EnvMap) -> ConfigResult<Configuration>`
/// closure is an extender too.
pub trait ConfigExtender: Send + Sync {
    /// Human-readable name of this extender
    fn name(&self) -> &str;

    /// Produce the final configuration for `subsystem` (e.g. `"API"`)
    fn extend(
        &self,
        subsystem: &str,
        defaults: Configuration,
        env: &EnvMap,
    ) -> ConfigResult<Configuration>;
}

impl<F> ConfigExtender for F
where
    F: Fn(&str, Configuration, &EnvMap) -> ConfigResult<Configuration> + Send + Sync,
{
    fn name(&self) -> &str {
        "fn"
    }

    fn extend(
        &self,
        subsystem: &str,
        defaults: Configuration,
        env: &EnvMap,
    ) -> ConfigResult<Configuration> {
        self(subsystem, defaults, env)
    }
}

/// Errors that can occur while assembling the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("Invalid override {key}: {message}")]
    InvalidOverride { key: String, message: String },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
