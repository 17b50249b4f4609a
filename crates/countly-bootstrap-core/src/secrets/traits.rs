//! Core traits and types for secret storage

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading from a secret store
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Failed to read secret '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Read-only source of secret values
///
/// Implementations:
/// - Docker secret files (`FileSecretStore`)
/// - In-memory for testing (`MemorySecretStore`)
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Where `key` lives in this store, for diagnostics
    ///
    /// For file stores this is the full path; other stores return the key.
    fn locate(&self, key: &str) -> String {
        key.to_string()
    }

    /// Read a secret by key
    fn read(&self, key: &str) -> SecretStoreResult<String>;

    /// Check if a secret can be read
    fn has(&self, key: &str) -> bool {
        self.read(key).is_ok()
    }
}
