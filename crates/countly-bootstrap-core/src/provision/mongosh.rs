//! User administration through the `mongosh` shell

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::admin::{AdminError, AdminResult, UserAdmin};
use super::user::DatabaseUserSpec;

pub const DEFAULT_MONGOSH: &str = "mongosh";
pub const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017/admin";

/// Creates users by piping a script into `mongosh`
///
/// The script travels over stdin, so credentials never appear in the process
/// argument list.
#[derive(Debug, Clone)]
pub struct MongoshUserAdmin {
    program: PathBuf,
    uri: String,
}

impl Default for MongoshUserAdmin {
    fn default() -> Self {
        Self::new(DEFAULT_MONGODB_URI)
    }
}

impl MongoshUserAdmin {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_MONGOSH),
            uri: uri.into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// The shell script that creates `spec`
    ///
    /// Serialized JSON doubles as a JavaScript literal. Failures exit with
    /// status 1 so they surface regardless of how the shell treats stdin.
    pub fn script(spec: &DatabaseUserSpec) -> String {
        let database = serde_json::Value::String(spec.database.clone());
        format!(
            "try {{ db.getSiblingDB({}).createUser({}); }} catch (e) {{ print(e.codeName || '', e.message); quit(1); }}\n",
            database,
            spec.create_user_document()
        )
    }
}

#[async_trait]
impl UserAdmin for MongoshUserAdmin {
    fn name(&self) -> &str {
        "mongosh"
    }

    async fn create_user(&self, spec: &DatabaseUserSpec) -> AdminResult<()> {
        let mut child = Command::new(&self.program)
            .arg(&self.uri)
            .arg("--quiet")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AdminError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(Self::script(spec).as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if output.status.success() {
            return Ok(());
        }

        let text = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
        .trim()
        .to_string();

        if text.contains("already exists") {
            return Err(AdminError::DuplicateUser {
                user: spec.username.clone(),
                database: spec.database.clone(),
            });
        }

        Err(AdminError::Command {
            program: self.program_name(),
            status: output.status.to_string(),
            output: text,
        })
    }
}
