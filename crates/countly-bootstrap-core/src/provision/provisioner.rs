//! Creates the Countly MongoDB user on the main database and its siblings

use std::sync::Arc;

use thiserror::Error;

use crate::env::EnvMap;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::resolver::{resolve_env, SecretResolver};
use crate::secrets::{MONGODB_PASSWORD_SECRET, MONGODB_USERNAME_SECRET};

use super::admin::{AdminError, UserAdmin};
use super::user::{DatabaseUserSpec, Role};

/// Environment variable naming the main database
pub const DATABASE_ENV: &str = "MONGODB_DATABASE";

/// Suffixes of the databases the user is created on, in request order
pub const SIBLING_SUFFIXES: [&str; 4] = ["", "_out", "_drill", "_fs"];

/// Errors that stop provisioning
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("expected environment variable '{}'", DATABASE_ENV)]
    MissingDatabaseName,

    #[error(
        "credentials '{}' and '{}' not available",
        MONGODB_USERNAME_SECRET,
        MONGODB_PASSWORD_SECRET
    )]
    MissingCredentials,

    #[error("failed to create user on '{database}': {source}")]
    CreateUser {
        database: String,
        #[source]
        source: AdminError,
    },
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub username: String,
    /// Databases the user now exists on, in creation order
    pub databases: Vec<String>,
}

/// One-shot provisioning of the Countly database user
///
/// Reads the database name from `MONGODB_DATABASE` and the credentials from
/// the Docker secrets, then creates the user with `readWrite` on
/// `<db>`, `<db>_out`, `<db>_drill` and `<db>_fs`. Validation happens before
/// any request is sent. The first failed request stops the run.
pub struct DatabaseProvisioner {
    admin: Arc<dyn UserAdmin>,
    secrets: SecretResolver,
    logger: SharedLogger,
}

impl DatabaseProvisioner {
    pub fn new(admin: Arc<dyn UserAdmin>, secrets: SecretResolver) -> Self {
        Self {
            admin,
            secrets,
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Validate inputs and list the users that would be created
    pub fn plan(&self, env: &EnvMap) -> Result<Vec<DatabaseUserSpec>, ProvisionError> {
        let database = resolve_env(env, DATABASE_ENV, "");
        if database.is_empty() {
            return Err(ProvisionError::MissingDatabaseName);
        }

        let username = self.secrets.resolve_or(MONGODB_USERNAME_SECRET, "");
        let password = self.secrets.resolve_or(MONGODB_PASSWORD_SECRET, "");
        if username.is_empty() || password.is_empty() {
            return Err(ProvisionError::MissingCredentials);
        }

        Ok(SIBLING_SUFFIXES
            .iter()
            .map(|suffix| {
                DatabaseUserSpec::new(
                    format!("{}{}", database, suffix),
                    username.clone(),
                    password.clone(),
                    Role::ReadWrite,
                )
            })
            .collect())
    }

    /// Create the user on every database from `plan`
    pub async fn provision(&self, env: &EnvMap) -> Result<ProvisionReport, ProvisionError> {
        let specs = self.plan(env)?;
        let username = specs[0].username.clone();
        let mut databases = Vec::with_capacity(specs.len());

        for spec in &specs {
            self.logger.debug(&format!(
                "creating user '{}' with role {} on '{}' via {}",
                spec.username,
                spec.role,
                spec.database,
                self.admin.name()
            ));
            self.admin
                .create_user(spec)
                .await
                .map_err(|source| ProvisionError::CreateUser {
                    database: spec.database.clone(),
                    source,
                })?;
            self.logger.info(&format!("created user on '{}'", spec.database));
            databases.push(spec.database.clone());
        }

        Ok(ProvisionReport { username, databases })
    }
}

impl std::fmt::Debug for DatabaseProvisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseProvisioner")
            .field("admin", &self.admin.name())
            .field("secrets", &self.secrets)
            .finish()
    }
}
