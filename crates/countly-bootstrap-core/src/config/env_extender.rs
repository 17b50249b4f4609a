//! `COUNTLY_CONFIG_*` environment overrides

use std::sync::Arc;

use crate::env::EnvMap;
use crate::logging::{NoOpLogger, SharedLogger};

use super::model::Configuration;
use super::overlay::{set_by_segments, set_text_by_segments};
use super::traits::{ConfigError, ConfigExtender, ConfigResult};

/// Prefix for overrides that apply to every subsystem
pub const SHARED_PREFIX: &str = "COUNTLY_CONFIG__";

/// Overrides configuration fields from environment variables
///
/// `COUNTLY_CONFIG__MONGODB_HOST=db` sets `mongodb.host` for every subsystem,
/// `COUNTLY_CONFIG_API_API_PORT=8080` sets `api.port` for the `API`
/// subsystem only. Subsystem variables are applied after shared ones and so
/// win when both name the same field. Names that match no field are skipped.
///
/// # Example
///
/// ```
/// use countly_bootstrap_core::config::{Configuration, ConfigExtender, EnvConfigExtender};
/// use countly_bootstrap_core::env::EnvMap;
///
/// let env = EnvMap::new().with("COUNTLY_CONFIG_API_API_MAX_SOCKETS", "2048");
/// let config = EnvConfigExtender::new()
///     .extend("API", Configuration::with_credentials("u", "p"), &env)
///     .unwrap();
/// assert_eq!(config.api.max_sockets, 2048);
/// ```
#[derive(Clone)]
pub struct EnvConfigExtender {
    logger: SharedLogger,
}

impl Default for EnvConfigExtender {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfigExtender {
    pub fn new() -> Self {
        Self {
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Variables that apply to `subsystem`, as `(variable, field path, value)`
    ///
    /// Shared variables come first, then subsystem ones; each group is sorted
    /// by variable name.
    pub fn overrides<'a>(subsystem: &str, env: &'a EnvMap) -> Vec<(&'a str, &'a str, &'a str)> {
        let specific_prefix = format!("COUNTLY_CONFIG_{}_", subsystem.to_uppercase());
        let collect = |prefix: &str| -> Vec<(&'a str, &'a str, &'a str)> {
            env.iter()
                .filter_map(|(name, value)| {
                    name.strip_prefix(prefix)
                        .filter(|rest| !rest.is_empty())
                        .map(|rest| (name, rest, value))
                })
                .collect()
        };

        let mut all = collect(SHARED_PREFIX);
        all.extend(collect(&specific_prefix));
        all
    }
}

impl ConfigExtender for EnvConfigExtender {
    fn name(&self) -> &str {
        "env"
    }

    fn extend(
        &self,
        subsystem: &str,
        defaults: Configuration,
        env: &EnvMap,
    ) -> ConfigResult<Configuration> {
        let overrides = Self::overrides(subsystem, env);
        if overrides.is_empty() {
            return Ok(defaults);
        }

        let mut tree = serde_json::to_value(&defaults)?;
        let mut config = defaults;
        for (name, rest, value) in overrides {
            let segments: Vec<&str> = rest.split('_').filter(|s| !s.is_empty()).collect();
            let mut parsed = tree.clone();
            let Some(path) = set_by_segments(&mut parsed, &segments, value) else {
                self.logger
                    .debug(&format!("{} matches no configuration field, skipped", name));
                continue;
            };

            // A value such as `0` parses as a number but may target a string field
            let (next, updated) = match serde_json::from_value::<Configuration>(parsed.clone()) {
                Ok(updated) => (parsed, updated),
                Err(parse_err) => {
                    let mut text = tree.clone();
                    set_text_by_segments(&mut text, &segments, value);
                    match serde_json::from_value::<Configuration>(text.clone()) {
                        Ok(updated) => (text, updated),
                        Err(_) => {
                            return Err(ConfigError::InvalidOverride {
                                key: name.to_string(),
                                message: parse_err.to_string(),
                            })
                        }
                    }
                }
            };
            self.logger.debug(&format!("{} overrides {}", name, path));
            tree = next;
            config = updated;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for EnvConfigExtender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfigExtender").finish()
    }
}
