//! Database user request types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::REDACTED;

/// Built-in MongoDB role granted on a single database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    ReadWrite,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ReadWrite => "readWrite",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user to create, scoped to one database
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseUserSpec {
    pub database: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl DatabaseUserSpec {
    pub fn new(
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            database: database.into(),
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    /// The `createUser` document, with the role scoped to `database`
    pub fn create_user_document(&self) -> Value {
        json!({
            "user": self.username,
            "pwd": self.password,
            "roles": [{ "role": self.role.as_str(), "db": self.database }],
        })
    }
}

impl fmt::Debug for DatabaseUserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseUserSpec")
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}
