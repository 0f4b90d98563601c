//! Database migrations

use anyhow::{Context, Result};
use cognito_auth::config::CognitoAuthConfig;
use console::style;

use super::{connect, SUCCESS};

/// Apply pending migrations
pub async fn migrate(config: &CognitoAuthConfig) -> Result<()> {
    println!(
        "{} {}",
        style("Running").green().bold(),
        style("database migrations...").bold()
    );

    let pool = connect(config).await?;
    cognito_auth::database::migrate(&pool)
        .await
        .context("Failed to run migrations")?;

    println!("{} Database is up to date", SUCCESS);
    Ok(())
}
