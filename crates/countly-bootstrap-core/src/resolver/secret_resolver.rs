//! Mandatory and optional secret lookup on top of a `SecretStore`

use std::sync::Arc;

use thiserror::Error;

use crate::logging::{NoOpLogger, SharedLogger};
use crate::secrets::{FileSecretStore, SecretStore, SecretStoreError};

/// A mandatory secret could not be read
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Docker secret '{path}' not found")]
    MissingSecret {
        path: String,
        #[source]
        source: SecretStoreError,
    },
}

impl SecretError {
    /// Location of the secret that failed
    pub fn path(&self) -> &str {
        match self {
            SecretError::MissingSecret { path, .. } => path,
        }
    }
}

/// Resolves secrets from a store
///
/// `resolve` is for values the caller cannot run without and reports a
/// `SecretError`. `resolve_or` falls back to a default and never fails.
/// Neither trims the value.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use countly_bootstrap_core::secrets::MemorySecretStore;
/// use countly_bootstrap_core::resolver::SecretResolver;
///
/// let store = Arc::new(MemorySecretStore::with_secrets([("user", "countly")]));
/// let resolver = SecretResolver::new(store);
/// assert_eq!(resolver.resolve("user").unwrap(), "countly");
/// assert_eq!(resolver.resolve_or("pwd", ""), "");
/// ```
#[derive(Clone)]
pub struct SecretResolver {
    store: Arc<dyn SecretStore>,
    logger: SharedLogger,
}

impl SecretResolver {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            store,
            logger: Arc::new(NoOpLogger),
        }
    }

    /// Resolver over Docker secrets in `/run/secrets`
    pub fn docker() -> Self {
        Self::new(Arc::new(FileSecretStore::docker()))
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Read a mandatory secret
    ///
    /// The underlying cause is logged at debug level; the caller reports the
    /// returned `SecretError::MissingSecret`.
    pub fn resolve(&self, key: &str) -> Result<String, SecretError> {
        match self.store.read(key) {
            Ok(value) => {
                self.logger.debug(&format!(
                    "resolved secret '{}' from {} store",
                    key,
                    self.store.name()
                ));
                Ok(value)
            }
            Err(source) => {
                let path = self.store.locate(key);
                self.logger
                    .debug(&format!("Docker secret '{}' not found ({})", path, source));
                Err(SecretError::MissingSecret { path, source })
            }
        }
    }

    /// Read an optional secret, returning `default` on any failure
    pub fn resolve_or(&self, key: &str, default: &str) -> String {
        self.store.read(key).unwrap_or_else(|_| default.to_string())
    }
}

impl std::fmt::Debug for SecretResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretResolver")
            .field("store", &self.store.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger};
    use std::fs;
    use tempfile::tempdir;

    fn file_resolver(dir: &std::path::Path) -> (SecretResolver, Arc<MemoryLogger>) {
        let logger = Arc::new(MemoryLogger::new());
        let resolver = SecretResolver::new(Arc::new(FileSecretStore::new(dir)))
            .with_logger(logger.clone());
        (resolver, logger)
    }

    #[test]
    fn test_resolve_returns_contents_unchanged() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pwd"), "s3cret \n").unwrap();
        let (resolver, logger) = file_resolver(dir.path());

        assert_eq!(resolver.resolve("pwd").unwrap(), "s3cret \n");
        assert!(logger.messages_at(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_resolve_missing_reports_path() {
        let dir = tempdir().unwrap();
        let (resolver, logger) = file_resolver(dir.path());

        let err = resolver.resolve("countly_mongodb_password").unwrap_err();
        let expected = dir.path().join("countly_mongodb_password").display().to_string();
        assert_eq!(err.path(), expected);
        assert_eq!(err.to_string(), format!("Docker secret '{}' not found", expected));

        let debug = logger.messages_at(LogLevel::Debug);
        assert_eq!(debug.len(), 1);
        assert!(debug[0].contains(&expected));
        assert!(logger.messages_at(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_resolve_or_is_silent() {
        let dir = tempdir().unwrap();
        let (resolver, logger) = file_resolver(dir.path());

        assert_eq!(resolver.resolve_or("missing", "fallback"), "fallback");
        assert_eq!(resolver.resolve_or("missing", ""), "");
        assert!(logger.is_empty());
    }

    #[test]
    fn test_resolve_or_does_not_trim() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("user"), "countly\n").unwrap();
        let (resolver, _) = file_resolver(dir.path());

        assert_eq!(resolver.resolve_or("user", ""), "countly\n");
    }
}
