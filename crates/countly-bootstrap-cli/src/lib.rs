//! Pieces shared by the `countly-api-config` and `countly-mongo-init` binaries

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use serde_json::Value;

use countly_bootstrap_core::secrets::DEFAULT_SECRETS_DIR;
use countly_bootstrap_core::{ConsoleLogger, FileSecretStore, LogLevel, SecretResolver, SharedLogger};

/// Flags both binaries accept
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory holding the Docker secrets
    #[arg(long, env = "COUNTLY_SECRETS_DIR", default_value = DEFAULT_SECRETS_DIR)]
    pub secrets_dir: PathBuf,

    /// Minimum level for diagnostics on the console
    #[arg(long, env = "COUNTLY_LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

impl CommonArgs {
    pub fn logger(&self, prefix: &str) -> SharedLogger {
        Arc::new(ConsoleLogger::with_prefix(prefix).with_min_level(self.log_level))
    }

    pub fn secret_resolver(&self, logger: SharedLogger) -> SecretResolver {
        SecretResolver::new(Arc::new(FileSecretStore::new(&self.secrets_dir))).with_logger(logger)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render `value` in the requested format
pub fn render(value: &Value, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    }
}

/// Print a fatal diagnostic and exit with status 1
pub fn fatal(tag: &str, err: impl Display) -> ! {
    eprintln!("{}: {}", tag, err);
    std::process::exit(1);
}
