//! cognito-auth: Authorization Code sign-in against Amazon Cognito's hosted UI
//!
//! The crate builds the hosted UI login and logout redirects, exchanges
//! authorization codes for tokens, fetches user attributes, and records the
//! outcome in `PostgreSQL`:
//! - **users**: one row per email, refreshed on every sign-in
//! - **tokens**: the user's current tokens, overwritten on every sign-in
//! - **login history**: one appended row per sign-in with the client IP
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cognito_auth::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = CognitoAuthConfig::load()?;
//!     cognito_auth::observability::init(&config.observability)?;
//!
//!     let pool = cognito_auth::database::connect(&config.database).await?;
//!     cognito_auth::database::migrate(&pool).await?;
//!
//!     let service = CognitoAuthService::from_config(&config, pool)?;
//!
//!     // Redirect the browser here and keep `redirect.state` for the callback
//!     let redirect = service.login_url();
//!     println!("{}", redirect.url);
//!
//!     // On callback with ?code=...&state=...
//!     let signed_in = service.authenticate("code-from-callback", None).await?;
//!     println!("Welcome {}", signed_in.user.email);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! See [`config`] for file locations and environment overrides.

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod oauth2;
pub mod observability;
pub mod service;
pub mod store;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use cognito_auth::prelude::*;
    //! ```

    // Configuration
    pub use crate::config::{
        CognitoAuthConfig, CognitoSettings, ConfigError, DatabaseSettings, HttpSettings,
    };

    // Error types
    pub use crate::error::{AuthError, AuthResult};

    // Persisted records
    pub use crate::models::{LoginHistory, User, UserToken};

    // Cognito client
    pub use crate::oauth2::{AuthorizationRedirect, CognitoProvider, CognitoUserInfo, OAuthToken};

    // Sign-in flow
    pub use crate::service::{AuthenticatedUser, CognitoAuthService};
    pub use crate::store::{AuthStore, PgAuthStore};
}
