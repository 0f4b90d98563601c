//! Error types and error handling

use thiserror::Error;

/// Result alias used throughout the crate
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors raised while talking to Cognito or persisting the outcome
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider rejected the request (bad code, expired token, ...)
    ///
    /// Carries the provider's `error_description` when one was sent.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Transport-level failure reaching the provider
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a body we could not understand
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Configuration error (bad endpoint or redirect URL)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Whether this error came from the provider refusing the credentials
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
