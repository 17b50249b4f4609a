//! In-memory secret store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// In-memory secret store for tests
///
/// Keys are matched exactly; `locate` reports them with a `memory:` scheme.
///
/// # Example
///
/// ```
/// use countly_bootstrap_core::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::new();
/// store.insert("countly_mongodb_username", "countly");
/// assert_eq!(store.read("countly_mongodb_username").unwrap(), "countly");
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial values
    pub fn with_secrets<K, V>(initial: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            secrets: RwLock::new(initial.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.secrets.write().insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.secrets.write().remove(key);
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn locate(&self, key: &str) -> String {
        format!("memory:{}", key)
    }

    fn read(&self, key: &str) -> SecretStoreResult<String> {
        self.secrets
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| SecretStoreError::NotFound(self.locate(key)))
    }
}
