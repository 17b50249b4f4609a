//! Countly Bootstrap Core
//!
//! Container bootstrap for a Countly deployment:
//! - Assemble the API server configuration from Docker secrets, built-in
//!   defaults and `COUNTLY_CONFIG_*` / YAML overrides
//! - Create the Countly MongoDB user on the main database and its
//!   `_out`, `_drill` and `_fs` siblings
//!
//! Nothing in this crate exits the process. Missing secrets, variables and
//! credentials come back as errors and the binaries decide what to do.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use countly_bootstrap_core::{ConfigAssembler, EnvConfigExtender, EnvMap, SecretResolver};
//!
//! let env = EnvMap::from_process();
//! let config = ConfigAssembler::new(SecretResolver::docker())
//!     .with_extender(Arc::new(EnvConfigExtender::new()))
//!     .assemble(&env)?;
//! ```

pub mod env;
pub mod logging;
pub mod secrets;
pub mod resolver;
pub mod config;
pub mod provision;

pub use env::EnvMap;

pub use logging::{Logger, SharedLogger, LogLevel, ConsoleLogger, NoOpLogger, MemoryLogger};

pub use secrets::{
    SecretStore, SecretStoreError, FileSecretStore, MemorySecretStore,
};

pub use resolver::{SecretResolver, SecretError, resolve_env};

pub use config::{
    Configuration, ConfigAssembler, ConfigExtender, ConfigError,
    IdentityExtender, EnvConfigExtender, FileConfigExtender, ChainExtender,
};

pub use provision::{
    DatabaseProvisioner, DatabaseUserSpec, ProvisionError, ProvisionReport, Role,
    UserAdmin, AdminError, MemoryUserAdmin, MongoshUserAdmin,
};
