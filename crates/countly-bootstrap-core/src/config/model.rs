//! The API server configuration record and its defaults
//!
//! Field names on the wire follow the server's own config file
//! (`ignoreProxies`, `fileStorage`, `max_sockets`, ...), so the serialized
//! form can be handed to the API process unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::LogLevel;

/// Placeholder used wherever a secret is printed
pub const REDACTED: &str = "********";

/// Complete API server configuration
///
/// There is no `Default`: the only constructor takes the MongoDB
/// credentials, so a configuration without them cannot be built.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub mongodb: MongoConfig,
    pub api: ApiConfig,
    /// Path prefix when the dashboard is not served from the web root
    pub path: String,
    pub logging: LoggingConfig,
    /// Proxy addresses skipped when reading `X-Forwarded-For`
    #[serde(rename = "ignoreProxies")]
    pub ignore_proxies: Vec<String>,
    pub encryption: EncryptionConfig,
    #[serde(rename = "fileStorage")]
    pub file_storage: FileStorage,
    /// Milliseconds between reloads of persisted configuration
    #[serde(rename = "reloadConfigAfter")]
    pub reload_config_after: u64,
}

impl Configuration {
    /// Defaults for every section, with the given MongoDB credentials
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mongodb: MongoConfig {
                username: username.into(),
                password: password.into(),
                ..MongoConfig::default()
            },
            api: ApiConfig::default(),
            path: String::new(),
            logging: LoggingConfig::default(),
            ignore_proxies: Vec::new(),
            encryption: EncryptionConfig::default(),
            file_storage: FileStorage::default(),
            reload_config_after: 10_000,
        }
    }

    /// JSON view with secrets masked and unset options omitted
    pub fn to_redacted_value(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(mongodb) = value.get_mut("mongodb") {
            mask(mongodb, "password");
        }
        if let Some(encryption) = value.get_mut("encryption") {
            mask(encryption, "key");
            mask(encryption, "iv");
        }
        Ok(prune_nulls(value))
    }

    /// JSON view with unset options omitted and secrets in clear text
    pub fn to_plain_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self).map(prune_nulls)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("mongodb", &self.mongodb)
            .field("api", &self.api)
            .field("path", &self.path)
            .field("logging", &self.logging)
            .field("ignore_proxies", &self.ignore_proxies)
            .field("encryption", &self.encryption)
            .field("file_storage", &self.file_storage)
            .field("reload_config_after", &self.reload_config_after)
            .finish()
    }
}

fn mask(section: &mut Value, field: &str) {
    if let Some(v) = section.get_mut(field) {
        if !v.is_null() {
            *v = Value::String(REDACTED.to_string());
        }
    }
}

/// Remove `null` members from every object in `value`
pub fn prune_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(prune_nulls).collect()),
        other => other,
    }
}

/// MongoDB connection settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    pub db: String,
    /// Connections per process
    pub max_pool_size: u32,
    pub username: String,
    pub password: String,
    /// Replica set members, used instead of `host` when set
    #[serde(rename = "replSetServers")]
    pub repl_set_servers: Option<Vec<String>>,
    #[serde(rename = "replicaName")]
    pub replica_name: Option<String>,
    /// Raw driver database options
    #[serde(rename = "dbOptions")]
    pub db_options: Option<Value>,
    /// Raw driver server options
    #[serde(rename = "serverOptions")]
    pub server_options: Option<Value>,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            db: "countly".to_string(),
            max_pool_size: 500,
            username: String::new(),
            password: String::new(),
            repl_set_servers: None,
            replica_name: None,
            db_options: None,
            server_options: None,
        }
    }
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("max_pool_size", &self.max_pool_size)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("repl_set_servers", &self.repl_set_servers)
            .field("replica_name", &self.replica_name)
            .finish_non_exhaustive()
    }
}

/// API HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub host: String,
    /// Maximum simultaneously open sockets
    pub max_sockets: u32,
    /// Worker processes; `None` means one per CPU core
    pub workers: Option<u32>,
    /// Request timeout in milliseconds
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "127.0.0.1".to_string(),
            max_sockets: 1024,
            workers: None,
            timeout: 120_000,
        }
    }
}

/// Log level defaults and per-module overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub default: LogLevel,
    #[serde(default)]
    pub debug: Vec<String>,
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub warn: Vec<String>,
    #[serde(default)]
    pub error: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: LogLevel::Warn,
            debug: Vec::new(),
            info: vec!["jobs".to_string(), "push".to_string()],
            warn: Vec::new(),
            error: Vec::new(),
        }
    }
}

impl LoggingConfig {
    /// Effective level for `module`
    ///
    /// The most verbose list naming the module wins; unlisted modules get
    /// `default`.
    pub fn level_for(&self, module: &str) -> LogLevel {
        let lists = [
            (LogLevel::Debug, &self.debug),
            (LogLevel::Info, &self.info),
            (LogLevel::Warn, &self.warn),
            (LogLevel::Error, &self.error),
        ];
        lists
            .iter()
            .find(|(_, modules)| modules.iter().any(|m| m == module))
            .map(|(level, _)| *level)
            .unwrap_or(self.default)
    }
}

/// Settings for the server's encrypt/decrypt helpers
///
/// Everything is optional; unset fields fall back to the `*_or_default`
/// accessors.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncryptionConfig {
    pub key: Option<String>,
    pub iv: Option<String>,
    pub algorithm: Option<String>,
    pub input_encoding: Option<String>,
    pub output_encoding: Option<String>,
}

impl EncryptionConfig {
    pub const DEFAULT_ALGORITHM: &'static str = "aes-256-cbc";
    pub const DEFAULT_INPUT_ENCODING: &'static str = "utf-8";
    pub const DEFAULT_OUTPUT_ENCODING: &'static str = "hex";

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn algorithm_or_default(&self) -> &str {
        self.algorithm.as_deref().unwrap_or(Self::DEFAULT_ALGORITHM)
    }

    pub fn input_encoding_or_default(&self) -> &str {
        self.input_encoding
            .as_deref()
            .unwrap_or(Self::DEFAULT_INPUT_ENCODING)
    }

    pub fn output_encoding_or_default(&self) -> &str {
        self.output_encoding
            .as_deref()
            .unwrap_or(Self::DEFAULT_OUTPUT_ENCODING)
    }
}

impl fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| REDACTED);
        f.debug_struct("EncryptionConfig")
            .field("key", &redact(&self.key))
            .field("iv", &redact(&self.iv))
            .field("algorithm", &self.algorithm)
            .field("input_encoding", &self.input_encoding)
            .field("output_encoding", &self.output_encoding)
            .finish()
    }
}

/// Where uploaded files are stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStorage {
    /// Local filesystem
    #[default]
    Fs,
    /// MongoDB GridFS
    GridFs,
}

impl FileStorage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStorage::Fs => "fs",
            FileStorage::GridFs => "gridfs",
        }
    }
}
