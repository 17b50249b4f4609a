//! Secret sources
//!
//! - `SecretStore` trait for read-only secret sources
//! - `FileSecretStore`: Docker secrets mounted under `/run/secrets`
//! - `MemorySecretStore`: for tests

mod traits;
mod file_store;
mod memory_store;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use file_store::{FileSecretStore, DEFAULT_SECRETS_DIR};
pub use memory_store::MemorySecretStore;

/// Docker secret holding the MongoDB user name
pub const MONGODB_USERNAME_SECRET: &str = "countly_mongodb_username";

/// Docker secret holding the MongoDB password
pub const MONGODB_PASSWORD_SECRET: &str = "countly_mongodb_password";
