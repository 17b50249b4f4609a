//! Docker secret files

use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Directory the container orchestrator mounts secrets into
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// Secret store backed by one file per secret
///
/// Relative keys are resolved against the store's directory, absolute keys
/// are read as-is. Contents are returned exactly as stored: a trailing
/// newline written by `echo` stays part of the value.
///
/// # Example
///
/// ```no_run
/// use countly_bootstrap_core::secrets::{FileSecretStore, SecretStore};
///
/// let store = FileSecretStore::docker();
/// let user = store.read("countly_mongodb_username");
/// ```
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `/run/secrets`
    pub fn docker() -> Self {
        Self::new(DEFAULT_SECRETS_DIR)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let key_path = Path::new(key);
        if key_path.is_absolute() {
            key_path.to_path_buf()
        } else {
            self.dir.join(key_path)
        }
    }
}

impl Default for FileSecretStore {
    fn default() -> Self {
        Self::docker()
    }
}

impl SecretStore for FileSecretStore {
    fn name(&self) -> &str {
        "file"
    }

    fn locate(&self, key: &str) -> String {
        self.path_for(key).display().to_string()
    }

    fn read(&self, key: &str) -> SecretStoreResult<String> {
        let path = self.path_for(key);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => SecretStoreError::NotFound(path.display().to_string()),
            _ => SecretStoreError::Io { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_contents_verbatim() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("countly_mongodb_username"), "countly\n").unwrap();

        let store = FileSecretStore::new(dir.path());
        assert_eq!(store.read("countly_mongodb_username").unwrap(), "countly\n");
        assert!(store.has("countly_mongodb_username"));
    }

    #[test]
    fn test_absolute_key_ignores_dir() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("elsewhere");
        fs::write(&file, "value").unwrap();

        let store = FileSecretStore::new("/nonexistent/secrets");
        let key = file.to_str().unwrap();
        assert_eq!(store.read(key).unwrap(), "value");
        assert_eq!(store.locate(key), file.display().to_string());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileSecretStore::new(dir.path());

        let err = store.read("absent").unwrap_err();
        assert!(matches!(err, SecretStoreError::NotFound(ref p) if p.ends_with("absent")));
        assert!(!store.has("absent"));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let store = FileSecretStore::new(dir.path());

        assert!(matches!(store.read("nested"), Err(SecretStoreError::Io { .. })));
    }

    #[test]
    fn test_docker_default_dir() {
        let store = FileSecretStore::default();
        assert_eq!(store.dir(), Path::new("/run/secrets"));
        assert_eq!(store.locate("x"), "/run/secrets/x");
    }
}
