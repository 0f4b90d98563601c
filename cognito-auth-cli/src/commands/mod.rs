//! CLI command implementations

pub mod db;
pub mod history;
pub mod session;
pub mod urls;

use anyhow::{Context, Result};
use cognito_auth::config::CognitoAuthConfig;
use cognito_auth::service::CognitoAuthService;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use sqlx::PgPool;

pub(crate) static SUCCESS: Emoji = Emoji("✓", "√");
pub(crate) static INFO: Emoji = Emoji("ℹ", "i");

/// Open the configured database
pub(crate) async fn connect(config: &CognitoAuthConfig) -> Result<PgPool> {
    cognito_auth::database::connect(&config.database)
        .await
        .context("Failed to connect to database")
}

/// Build the sign-in service over the configured database
pub(crate) async fn service(config: &CognitoAuthConfig) -> Result<CognitoAuthService> {
    let pool = connect(config).await?;
    CognitoAuthService::from_config(config, pool).context("Invalid Cognito configuration")
}

/// Spinner shown while waiting on Cognito or the database
pub(crate) fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(message);
    Ok(spinner)
}
