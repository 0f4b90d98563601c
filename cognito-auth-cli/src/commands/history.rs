//! Sign-in history listing and pruning

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use cognito_auth::config::CognitoAuthConfig;
use cognito_auth::models::LoginHistory;
use console::style;
use dialoguer::Confirm;

use super::{connect, INFO, SUCCESS};

/// List recent sign-ins for a user
pub async fn list(config: &CognitoAuthConfig, user_id: i64, limit: u32) -> Result<()> {
    let pool = connect(config).await?;
    let entries = LoginHistory::find_by_user_id(&pool, user_id, i64::from(limit))
        .await
        .context("Failed to load sign-in history")?;

    println!("\n{} Sign-in history for user {}", INFO, user_id);
    println!();
    println!("{:<10} {:<28} {:<40}", "ID", "Signed in", "IP address");
    println!("{}", "─".repeat(80));

    if entries.is_empty() {
        println!("  {}", style("(No sign-ins recorded)").dim());
    }
    for entry in &entries {
        println!(
            "{:<10} {:<28} {:<40}",
            entry.id,
            entry.logged_in_at.to_rfc3339(),
            entry.ip_address.as_deref().unwrap_or("-")
        );
    }
    println!();
    Ok(())
}

/// Moment `days` days before now
fn cutoff(days: u32) -> Result<DateTime<Utc>> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|age| Utc::now().checked_sub_signed(age))
        .with_context(|| format!("--days {days} reaches past the supported date range"))
}

/// Delete history older than `days`
pub async fn prune(config: &CognitoAuthConfig, days: u32, force: bool) -> Result<()> {
    let cutoff = cutoff(days)?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete sign-in history before {}?",
                cutoff.format("%Y-%m-%d %H:%M UTC")
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            println!("{} Cancelled", INFO);
            return Ok(());
        }
    }

    let pool = connect(config).await?;
    let removed = LoginHistory::prune_before(&pool, cutoff)
        .await
        .context("Failed to prune sign-in history")?;

    println!("{} Removed {} sign-in entries", SUCCESS, style(removed).bold());
    Ok(())
}
