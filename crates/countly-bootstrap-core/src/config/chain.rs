//! Identity and chained extenders

use std::sync::Arc;

use crate::env::EnvMap;

use super::model::Configuration;
use super::traits::{ConfigExtender, ConfigResult};

/// Returns the defaults unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExtender;

impl ConfigExtender for IdentityExtender {
    fn name(&self) -> &str {
        "identity"
    }

    fn extend(
        &self,
        _subsystem: &str,
        defaults: Configuration,
        _env: &EnvMap,
    ) -> ConfigResult<Configuration> {
        Ok(defaults)
    }
}

/// Runs extenders in order, each seeing the previous one's output
///
/// The first error stops the chain.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use countly_bootstrap_core::config::{ChainExtender, EnvConfigExtender, FileConfigExtender};
///
/// // File overlay first, environment on top
/// let chain = ChainExtender::new(vec![
///     Arc::new(FileConfigExtender::new("/etc/countly/api.yaml")),
///     Arc::new(EnvConfigExtender::new()),
/// ]);
/// ```
#[derive(Clone, Default)]
pub struct ChainExtender {
    extenders: Vec<Arc<dyn ConfigExtender>>,
}

impl ChainExtender {
    pub fn new(extenders: Vec<Arc<dyn ConfigExtender>>) -> Self {
        Self { extenders }
    }

    pub fn push(&mut self, extender: Arc<dyn ConfigExtender>) {
        self.extenders.push(extender);
    }

    pub fn len(&self) -> usize {
        self.extenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extenders.is_empty()
    }

    /// Names of the chained extenders, in order
    pub fn names(&self) -> Vec<&str> {
        self.extenders.iter().map(|e| e.name()).collect()
    }
}

impl ConfigExtender for ChainExtender {
    fn name(&self) -> &str {
        "chain"
    }

    fn extend(
        &self,
        subsystem: &str,
        defaults: Configuration,
        env: &EnvMap,
    ) -> ConfigResult<Configuration> {
        self.extenders
            .iter()
            .try_fold(defaults, |config, extender| extender.extend(subsystem, config, env))
    }
}

impl std::fmt::Debug for ChainExtender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainExtender")
            .field("extenders", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, EnvConfigExtender};

    fn defaults() -> Configuration {
        Configuration::with_credentials("u", "p")
    }

    #[test]
    fn test_identity() {
        let config = IdentityExtender.extend("API", defaults(), &EnvMap::new()).unwrap();
        assert_eq!(config, defaults());
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain = ChainExtender::default();
        assert!(chain.is_empty());
        assert_eq!(chain.extend("API", defaults(), &EnvMap::new()).unwrap(), defaults());
    }

    #[test]
    fn test_chain_applies_in_order() {
        let set_port = |_: &str, mut c: Configuration, _: &EnvMap| -> ConfigResult<Configuration> {
            c.api.port = 1111;
            Ok(c)
        };
        let chain = ChainExtender::new(vec![
            Arc::new(set_port),
            Arc::new(EnvConfigExtender::new()),
        ]);
        let env = EnvMap::new().with("COUNTLY_CONFIG_API_API_PORT", "2222");

        assert_eq!(chain.names(), vec!["fn", "env"]);
        let config = chain.extend("API", defaults(), &env).unwrap();
        assert_eq!(config.api.port, 2222);
    }

    #[test]
    fn test_chain_stops_on_error() {
        let fail = |_: &str, _: Configuration, _: &EnvMap| -> ConfigResult<Configuration> {
            Err(ConfigError::Other("boom".to_string()))
        };
        let never = |_: &str, _: Configuration, _: &EnvMap| -> ConfigResult<Configuration> {
            panic!("must not run after a failure")
        };
        let chain = ChainExtender::new(vec![Arc::new(fail), Arc::new(never)]);

        let err = chain.extend("API", defaults(), &EnvMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: boom");
    }
}
