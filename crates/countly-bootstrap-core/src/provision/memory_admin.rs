//! In-memory user administration

use async_trait::async_trait;
use parking_lot::RwLock;

use super::admin::{AdminError, AdminResult, UserAdmin};
use super::user::DatabaseUserSpec;

/// Records every create request
///
/// Behaves like a fresh server: a second request for the same user on the
/// same database is rejected with `AdminError::DuplicateUser`.
#[derive(Debug, Default)]
pub struct MemoryUserAdmin {
    created: RwLock<Vec<DatabaseUserSpec>>,
    attempts: RwLock<Vec<String>>,
}

impl MemoryUserAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a user, e.g. to provoke a duplicate
    pub fn with_existing(spec: DatabaseUserSpec) -> Self {
        let admin = Self::new();
        admin.created.write().push(spec);
        admin
    }

    /// Users created so far, in request order
    pub fn created(&self) -> Vec<DatabaseUserSpec> {
        self.created.read().clone()
    }

    /// Target database of every request, successful or not
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.read().clone()
    }
}

#[async_trait]
impl UserAdmin for MemoryUserAdmin {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create_user(&self, spec: &DatabaseUserSpec) -> AdminResult<()> {
        self.attempts.write().push(spec.database.clone());

        let mut created = self.created.write();
        if created
            .iter()
            .any(|u| u.database == spec.database && u.username == spec.username)
        {
            return Err(AdminError::DuplicateUser {
                user: spec.username.clone(),
                database: spec.database.clone(),
            });
        }
        created.push(spec.clone());
        Ok(())
    }
}
