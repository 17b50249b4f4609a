//! Builds the API server configuration from secrets, defaults and overrides

use std::sync::Arc;

use crate::env::EnvMap;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::resolver::SecretResolver;
use crate::secrets::{MONGODB_PASSWORD_SECRET, MONGODB_USERNAME_SECRET};

use super::chain::IdentityExtender;
use super::model::Configuration;
use super::traits::{ConfigExtender, ConfigResult};

/// Subsystem label the API server's configuration is extended under
pub const API_SUBSYSTEM: &str = "API";

/// Assembles the API `Configuration`
///
/// 1. Reads the MongoDB username and password secrets; a missing one aborts.
/// 2. Builds the defaults around them.
/// 3. Hands the defaults, the subsystem label and the environment to the
///    extender and returns what it produces.
pub struct ConfigAssembler {
    secrets: SecretResolver,
    extender: Arc<dyn ConfigExtender>,
    subsystem: String,
    logger: SharedLogger,
}

impl ConfigAssembler {
    /// Assembler with the identity extender
    pub fn new(secrets: SecretResolver) -> Self {
        Self {
            secrets,
            extender: Arc::new(IdentityExtender),
            subsystem: API_SUBSYSTEM.to_string(),
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_extender(mut self, extender: Arc<dyn ConfigExtender>) -> Self {
        self.extender = extender;
        self
    }

    pub fn with_subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = subsystem.into();
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    pub fn assemble(&self, env: &EnvMap) -> ConfigResult<Configuration> {
        let username = self.secrets.resolve(MONGODB_USERNAME_SECRET)?;
        let password = self.secrets.resolve(MONGODB_PASSWORD_SECRET)?;

        let defaults = Configuration::with_credentials(username, password);
        let config = self.extender.extend(&self.subsystem, defaults, env)?;

        self.logger.info(&format!(
            "{} configuration assembled (extender: {}, listening on {}:{})",
            self.subsystem,
            self.extender.name(),
            config.api.host,
            config.api.port
        ));
        Ok(config)
    }
}

impl std::fmt::Debug for ConfigAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigAssembler")
            .field("secrets", &self.secrets)
            .field("extender", &self.extender.name())
            .field("subsystem", &self.subsystem)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, EnvConfigExtender};
    use crate::resolver::SecretError;
    use crate::secrets::{FileSecretStore, MemorySecretStore};
    use parking_lot::Mutex;
    use std::fs;
    use tempfile::tempdir;

    fn resolver_with(secrets: &[(&str, &str)]) -> SecretResolver {
        SecretResolver::new(Arc::new(MemorySecretStore::with_secrets(secrets.iter().copied())))
    }

    fn both_secrets() -> SecretResolver {
        resolver_with(&[
            (MONGODB_USERNAME_SECRET, "countly"),
            (MONGODB_PASSWORD_SECRET, "pw"),
        ])
    }

    #[test]
    fn test_assemble_defaults() {
        let config = ConfigAssembler::new(both_secrets()).assemble(&EnvMap::new()).unwrap();

        assert_eq!(config.api.port, 3001);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.mongodb.username, "countly");
        assert_eq!(config.mongodb.password, "pw");
        assert_eq!(config, Configuration::with_credentials("countly", "pw"));
    }

    #[test]
    fn test_secrets_from_files_keep_newlines() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MONGODB_USERNAME_SECRET), "countly\n").unwrap();
        fs::write(dir.path().join(MONGODB_PASSWORD_SECRET), "pw\n").unwrap();
        let secrets = SecretResolver::new(Arc::new(FileSecretStore::new(dir.path())));

        let config = ConfigAssembler::new(secrets).assemble(&EnvMap::new()).unwrap();
        assert_eq!(config.mongodb.username, "countly\n");
        assert_eq!(config.mongodb.password, "pw\n");
    }

    #[test]
    fn test_missing_username_aborts_before_extender() {
        let called = Arc::new(Mutex::new(false));
        let flag = called.clone();
        let extender = move |_: &str, c: Configuration, _: &EnvMap| -> ConfigResult<Configuration> {
            *flag.lock() = true;
            Ok(c)
        };

        let err = ConfigAssembler::new(resolver_with(&[(MONGODB_PASSWORD_SECRET, "pw")]))
            .with_extender(Arc::new(extender))
            .assemble(&EnvMap::new())
            .unwrap_err();

        match err {
            ConfigError::Secret(SecretError::MissingSecret { path, .. }) => {
                assert_eq!(path, "memory:countly_mongodb_username")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!*called.lock());
    }

    #[test]
    fn test_missing_password_aborts() {
        let err = ConfigAssembler::new(resolver_with(&[(MONGODB_USERNAME_SECRET, "countly")]))
            .assemble(&EnvMap::new())
            .unwrap_err();
        assert!(err.to_string().contains("countly_mongodb_password"));
    }

    #[test]
    fn test_extender_receives_subsystem_and_env() {
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let extender = move |subsystem: &str, c: Configuration, env: &EnvMap| -> ConfigResult<Configuration> {
            *sink.lock() = Some((subsystem.to_string(), env.get("MARKER").map(str::to_string)));
            Ok(c)
        };
        let env = EnvMap::new().with("MARKER", "yes");

        ConfigAssembler::new(both_secrets())
            .with_extender(Arc::new(extender))
            .assemble(&env)
            .unwrap();

        assert_eq!(
            seen.lock().clone(),
            Some(("API".to_string(), Some("yes".to_string())))
        );
    }

    #[test]
    fn test_env_extender_overrides() {
        let env = EnvMap::new().with("COUNTLY_CONFIG_API_API_HOST", "0.0.0.0");

        let config = ConfigAssembler::new(both_secrets())
            .with_extender(Arc::new(EnvConfigExtender::new()))
            .assemble(&env)
            .unwrap();

        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.api.port, 3001);
    }

    #[test]
    fn test_custom_subsystem_label() {
        let env = EnvMap::new()
            .with("COUNTLY_CONFIG_API_API_PORT", "1")
            .with("COUNTLY_CONFIG_JOBS_API_PORT", "2");

        let assembler = ConfigAssembler::new(both_secrets())
            .with_subsystem("JOBS")
            .with_extender(Arc::new(EnvConfigExtender::new()));
        assert_eq!(assembler.subsystem(), "JOBS");
        assert_eq!(assembler.assemble(&env).unwrap().api.port, 2);
    }
}
