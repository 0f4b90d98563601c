//! Login and logout redirect URLs

use anyhow::{Context, Result};
use cognito_auth::config::CognitoAuthConfig;
use cognito_auth::oauth2::CognitoProvider;
use console::style;

fn provider(config: &CognitoAuthConfig) -> Result<CognitoProvider> {
    CognitoProvider::new(&config.cognito, &config.http).context("Invalid Cognito configuration")
}

/// Print the login URL and the state to verify on callback
pub fn login_url(config: &CognitoAuthConfig, state: Option<&str>) -> Result<()> {
    let provider = provider(config)?;
    let redirect = match state {
        Some(state) => provider.login_url_with_state(state),
        None => provider.login_url(),
    };

    println!("{}", redirect.url);
    eprintln!("{} {}", style("state:").dim(), style(&redirect.state).cyan());
    Ok(())
}

/// Print the logout URL
pub fn logout_url(config: &CognitoAuthConfig) -> Result<()> {
    println!("{}", provider(config)?.logout_url());
    Ok(())
}
