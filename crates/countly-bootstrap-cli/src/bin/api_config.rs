//! Assemble the Countly API configuration and print it
//!
//! Exits with status 1 when a MongoDB secret is missing or an override is
//! invalid.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use countly_bootstrap_cli::{fatal, render, CommonArgs, OutputFormat};
use countly_bootstrap_core::config::{API_SUBSYSTEM, ChainExtender, ConfigExtender};
use countly_bootstrap_core::{ConfigAssembler, EnvConfigExtender, EnvMap, FileConfigExtender};

#[derive(Parser)]
#[command(name = "countly-api-config")]
#[command(about = "Build the Countly API configuration from Docker secrets and overrides")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// YAML file merged over the defaults before environment overrides
    #[arg(long, env = "COUNTLY_CONFIG_FILE")]
    overrides: Option<PathBuf>,

    /// Subsystem label for COUNTLY_CONFIG_<SUBSYSTEM>_* overrides
    #[arg(long, default_value = API_SUBSYSTEM)]
    subsystem: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Print passwords and keys instead of masking them
    #[arg(long)]
    show_secrets: bool,
}

fn main() {
    let cli = Cli::parse();
    let tag = format!("ERROR ({})", cli.subsystem);
    let logger = cli.common.logger("[countly-api]");
    let env = EnvMap::from_process();

    let mut extenders: Vec<Arc<dyn ConfigExtender>> = Vec::new();
    if let Some(path) = &cli.overrides {
        extenders.push(Arc::new(FileConfigExtender::new(path)));
    }
    extenders.push(Arc::new(EnvConfigExtender::new().with_logger(logger.clone())));

    let assembler = ConfigAssembler::new(cli.common.secret_resolver(logger.clone()))
        .with_subsystem(&cli.subsystem)
        .with_extender(Arc::new(ChainExtender::new(extenders)))
        .with_logger(logger);

    let config = assembler
        .assemble(&env)
        .unwrap_or_else(|e| fatal(&tag, e));

    let value = if cli.show_secrets {
        config.to_plain_value()
    } else {
        config.to_redacted_value()
    }
    .unwrap_or_else(|e| fatal(&tag, e));

    match render(&value, cli.format) {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => fatal(&tag, e),
    }
}
