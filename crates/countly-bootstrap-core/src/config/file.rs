//! YAML overlay file extender

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::env::EnvMap;

use super::model::Configuration;
use super::overlay::deep_merge;
use super::traits::{ConfigError, ConfigExtender, ConfigResult};

/// Merges a YAML file over the configuration
///
/// The file uses the same keys as the serialized configuration and may
/// contain any subset of them. A missing file leaves the configuration
/// untouched, so the overlay can be mounted optionally.
///
/// ```yaml
/// api:
///   port: 8080
/// fileStorage: gridfs
/// ```
///
/// # Example
///
/// ```no_run
/// use countly_bootstrap_core::config::FileConfigExtender;
///
/// let overlay = FileConfigExtender::new("/etc/countly/api.yaml");
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigExtender {
    path: PathBuf,
}

impl FileConfigExtender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the overlay file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the overlay file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the overlay as a JSON tree; `None` when the file is absent
    fn load(&self) -> ConfigResult<Option<Value>> {
        if !self.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let overlay: Value = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        match overlay {
            // An empty file parses as null
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(overlay)),
            _ => Err(ConfigError::Parse {
                path: self.path.clone(),
                message: "top level must be a mapping".to_string(),
            }),
        }
    }
}

impl ConfigExtender for FileConfigExtender {
    fn name(&self) -> &str {
        "file"
    }

    fn extend(
        &self,
        _subsystem: &str,
        defaults: Configuration,
        _env: &EnvMap,
    ) -> ConfigResult<Configuration> {
        let Some(overlay) = self.load()? else {
            return Ok(defaults);
        };

        let mut tree = serde_json::to_value(&defaults)?;
        deep_merge(&mut tree, overlay);
        serde_json::from_value(tree).map_err(|e| ConfigError::InvalidOverride {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}
