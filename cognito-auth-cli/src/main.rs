//! cognito-auth CLI tool

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use cognito_auth_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    cognito_auth::observability::init(&config.observability)
        .context("Failed to initialize logging")?;

    cli.command.execute(&config).await
}
