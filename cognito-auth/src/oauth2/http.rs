//! Shared HTTP client for provider calls
//!
//! Token requests and the userInfo lookup go through one `reqwest` client so
//! timeouts and the User-Agent are applied consistently.

use crate::config::HttpSettings;
use crate::error::{AuthError, AuthResult};

/// Build the HTTP client used for all Cognito requests
///
/// Redirects are disabled (`Policy::none`): a token endpoint answering with a
/// redirect must surface as an error rather than be followed.
///
/// # Errors
///
/// Returns [`AuthError::Configuration`] if the TLS backend cannot be initialized
pub fn build_http_client(settings: &HttpSettings) -> AuthResult<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(settings.timeout())
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|e| AuthError::Configuration(format!("Failed to build HTTP client: {e}")))
}
