//! User administration trait

use async_trait::async_trait;
use thiserror::Error;

use super::user::DatabaseUserSpec;

/// Errors reported by a `UserAdmin`
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("User '{user}' already exists on '{database}'")]
    DuplicateUser { user: String, database: String },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {output}")]
    Command {
        program: String,
        status: String,
        output: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Creates database users on a server
///
/// Implementations:
/// - `MemoryUserAdmin`: records requests, for tests and dry runs
/// - `MongoshUserAdmin`: drives the `mongosh` shell
#[async_trait]
pub trait UserAdmin: Send + Sync {
    /// Human-readable name of this backend
    fn name(&self) -> &str;

    /// Create the user described by `spec` on `spec.database`
    async fn create_user(&self, spec: &DatabaseUserSpec) -> AdminResult<()>;
}
