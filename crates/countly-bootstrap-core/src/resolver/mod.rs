//! Value resolution for the bootstrap procedures
//!
//! `SecretResolver` reads mandatory or optional secrets from a store,
//! `resolve_env` reads environment values with a fallback.

mod secret_resolver;
mod env_resolver;

pub use secret_resolver::{SecretResolver, SecretError};
pub use env_resolver::resolve_env;
