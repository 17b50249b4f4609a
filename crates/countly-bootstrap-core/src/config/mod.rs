//! API server configuration
//!
//! - `Configuration`: the record handed to the API server
//! - `ConfigAssembler`: secrets + defaults + extender
//! - `ConfigExtender` implementations: identity, environment, YAML file, chain

mod model;
mod traits;
mod overlay;
mod env_extender;
mod file;
mod chain;
mod assembler;

pub use model::{
    Configuration, MongoConfig, ApiConfig, LoggingConfig, EncryptionConfig, FileStorage,
    prune_nulls, REDACTED,
};
pub use traits::{ConfigExtender, ConfigError, ConfigResult};
pub use overlay::deep_merge;
pub use env_extender::{EnvConfigExtender, SHARED_PREFIX};
pub use file::FileConfigExtender;
pub use chain::{ChainExtender, IdentityExtender};
pub use assembler::{ConfigAssembler, API_SUBSYSTEM};
