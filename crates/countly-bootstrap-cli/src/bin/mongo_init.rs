//! Create the Countly MongoDB user on `<db>`, `<db>_out`, `<db>_drill`, `<db>_fs`
//!
//! Meant to run once against a fresh server. Exits with status 1 when
//! `MONGODB_DATABASE` or the credential secrets are missing, or when a user
//! cannot be created.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use countly_bootstrap_cli::{fatal, CommonArgs};
use countly_bootstrap_core::provision::{DEFAULT_MONGODB_URI, DEFAULT_MONGOSH};
use countly_bootstrap_core::{DatabaseProvisioner, EnvMap, MongoshUserAdmin};

const TAG: &str = "ERROR";

#[derive(Parser)]
#[command(name = "countly-mongo-init")]
#[command(about = "Create the Countly database user on the main database and its siblings")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Connection string of the server to provision
    #[arg(long, env = "MONGODB_URI", default_value = DEFAULT_MONGODB_URI)]
    uri: String,

    /// mongosh executable
    #[arg(long, env = "MONGOSH", default_value = DEFAULT_MONGOSH)]
    mongosh: PathBuf,

    /// Validate inputs and list the databases without creating anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let logger = cli.common.logger("[mongo-init]");
    let env = EnvMap::from_process();

    let admin = MongoshUserAdmin::new(&cli.uri).with_program(&cli.mongosh);
    let provisioner =
        DatabaseProvisioner::new(Arc::new(admin), cli.common.secret_resolver(logger.clone()))
            .with_logger(logger);

    if cli.dry_run {
        let plan = provisioner.plan(&env).unwrap_or_else(|e| fatal(TAG, e));
        for spec in plan {
            println!("{} -> {} ({})", spec.username.trim_end(), spec.database, spec.role);
        }
        return;
    }

    match provisioner.provision(&env).await {
        Ok(report) => println!(
            "created user on {} databases: {}",
            report.databases.len(),
            report.databases.join(", ")
        ),
        Err(e) => fatal(TAG, e),
    }
}
