//! Cognito hosted UI OAuth2 client
//!
//! This module covers the four Cognito endpoints used in an
//! Authorization Code sign-in:
//! - `GET /login` (browser redirect)
//! - `GET /logout` (browser redirect)
//! - `POST /oauth2/token` (code and refresh exchange, HTTP Basic client auth)
//! - `GET /oauth2/userInfo` (bearer access token)
//!
//! # Features
//!
//! - **CSRF state**: [`AuthorizationRedirect`] returns the generated state so
//!   the caller can keep it and compare it on callback
//! - **Provider errors**: rejections surface as
//!   [`AuthError::Authentication`](crate::error::AuthError::Authentication)
//!   carrying Cognito's `error_description`
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use cognito_auth::config::CognitoAuthConfig;
//! use cognito_auth::oauth2::CognitoProvider;
//!
//! # async fn example(code: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let config = CognitoAuthConfig::load()?;
//! let provider = CognitoProvider::new(&config.cognito, &config.http)?;
//!
//! let redirect = provider.login_url();
//! println!("Send the browser to {}", redirect.url);
//!
//! let token = provider.exchange_code(code).await?;
//! let user = provider.fetch_user_info(&token.access_token).await?;
//! println!("Signed in as {}", user.email);
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod provider;
pub mod types;

pub use provider::CognitoProvider;
pub use types::{AuthorizationRedirect, CognitoTokenFields, CognitoUserInfo, OAuthToken};
