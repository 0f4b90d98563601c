//! Code exchange, user info and token refresh

use std::net::IpAddr;

use anyhow::{Context, Result};
use cognito_auth::config::CognitoAuthConfig;
use cognito_auth::oauth2::CognitoProvider;
use console::style;

use super::{service, spinner, INFO, SUCCESS};

/// Exchange a code and persist the sign-in
pub async fn exchange(config: &CognitoAuthConfig, code: &str, ip: Option<IpAddr>) -> Result<()> {
    let service = service(config).await?;

    let progress = spinner("Exchanging authorization code...")?;
    let result = service.authenticate(code, ip).await;
    progress.finish_and_clear();

    let signed_in = result.context("Sign-in failed")?;
    println!(
        "{} Signed in {} (user {})",
        SUCCESS,
        style(&signed_in.user.email).cyan().bold(),
        signed_in.user.id
    );
    if let Some(expires_at) = signed_in.token.expires_at {
        println!("  {} {}", style("Access token expires:").dim(), expires_at.to_rfc3339());
    }
    Ok(())
}

/// Print the user's attributes without touching the database
pub async fn userinfo(config: &CognitoAuthConfig, access_token: &str) -> Result<()> {
    let provider =
        CognitoProvider::new(&config.cognito, &config.http).context("Invalid Cognito configuration")?;

    let progress = spinner("Fetching user info...")?;
    let result = provider.fetch_user_info(access_token).await;
    progress.finish_and_clear();

    let info = result.context("Failed to fetch user info")?;
    println!("\n{} User Info", INFO);
    println!("{}", "─".repeat(40));
    println!("  {:<16} {}", "Subject:", info.sub);
    println!("  {:<16} {}", "Email:", style(&info.email).cyan());
    println!("  {:<16} {}", "Email verified:", info.email_verified);
    if let Some(name) = info.display_name() {
        println!("  {:<16} {}", "Name:", name);
    }
    println!();
    Ok(())
}

/// Refresh and store a user's tokens
pub async fn refresh(config: &CognitoAuthConfig, user_id: i64, refresh_token: &str) -> Result<()> {
    let service = service(config).await?;

    let progress = spinner("Refreshing tokens...")?;
    let result = service.refresh_session(user_id, refresh_token).await;
    progress.finish_and_clear();

    let token = result.context("Token refresh failed")?;
    println!("{} Tokens refreshed for user {}", SUCCESS, token.user_id);
    Ok(())
}
