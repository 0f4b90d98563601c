//! Sign-in flow over a provider and a store
//!
//! [`CognitoAuthService`] ties the hosted UI endpoints to persistence:
//!
//! 1. send the browser to [`CognitoAuthService::login_url`]
//! 2. on callback, hand the code to [`CognitoAuthService::authenticate`]
//! 3. the user, their tokens and a sign-in entry are written in that order
//!
//! Any failure stops the flow; nothing after the failing step is written.

use std::net::IpAddr;

use sqlx::PgPool;

use crate::config::CognitoAuthConfig;
use crate::error::AuthResult;
use crate::models::{User, UserToken};
use crate::oauth2::{AuthorizationRedirect, CognitoProvider, CognitoUserInfo, OAuthToken};
use crate::store::{AuthStore, PgAuthStore};

/// Outcome of a completed sign-in
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Stored user record
    pub user: User,
    /// Stored tokens
    pub token: UserToken,
}

/// Cognito sign-in service
pub struct CognitoAuthService<S = PgAuthStore> {
    provider: CognitoProvider,
    store: S,
}

impl CognitoAuthService<PgAuthStore> {
    /// Build a service backed by `PostgreSQL` from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AuthError::Configuration`] if the Cognito
    /// endpoints cannot be built from the settings
    pub fn from_config(config: &CognitoAuthConfig, pool: PgPool) -> AuthResult<Self> {
        let provider = CognitoProvider::new(&config.cognito, &config.http)?;
        Ok(Self::new(provider, PgAuthStore::new(pool)))
    }
}

impl<S: AuthStore> CognitoAuthService<S> {
    /// Create a service from its parts
    #[must_use]
    pub const fn new(provider: CognitoProvider, store: S) -> Self {
        Self { provider, store }
    }

    /// Hosted UI login redirect with a fresh state
    #[must_use]
    pub fn login_url(&self) -> AuthorizationRedirect {
        self.provider.login_url()
    }

    /// Hosted UI login redirect with a caller-chosen state
    #[must_use]
    pub fn login_url_with_state(&self, state: impl Into<String>) -> AuthorizationRedirect {
        self.provider.login_url_with_state(state)
    }

    /// Hosted UI logout redirect
    #[must_use]
    pub fn logout_url(&self) -> String {
        self.provider.logout_url()
    }

    /// Exchange an authorization code for tokens without persisting anything
    ///
    /// # Errors
    ///
    /// See [`CognitoProvider::exchange_code`]
    pub async fn exchange_code(&self, code: &str) -> AuthResult<OAuthToken> {
        self.provider.exchange_code(code).await
    }

    /// Fetch user attributes for an access token
    ///
    /// # Errors
    ///
    /// See [`CognitoProvider::fetch_user_info`]
    pub async fn fetch_user_info(&self, access_token: &str) -> AuthResult<CognitoUserInfo> {
        self.provider.fetch_user_info(access_token).await
    }

    /// Complete a sign-in from the callback's authorization code
    ///
    /// Exchanges the code, fetches the user's attributes, upserts the user by
    /// email, overwrites their tokens and appends a sign-in entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AuthError::Authentication`] if Cognito rejects
    /// the code or token, or a database error from the store
    #[tracing::instrument(skip_all, fields(client_ip = ?client_ip))]
    pub async fn authenticate(
        &self,
        code: &str,
        client_ip: Option<IpAddr>,
    ) -> AuthResult<AuthenticatedUser> {
        let token = self.provider.exchange_code(code).await?;
        let user_info = self.provider.fetch_user_info(&token.access_token).await?;

        let user = self.store.upsert_user(&user_info).await?;
        let stored = self.store.store_token(user.id, &token).await?;
        self.store.record_login(user.id, client_ip).await?;

        tracing::info!(user_id = user.id, email = %user.email, "User signed in");

        Ok(AuthenticatedUser {
            user,
            token: stored,
        })
    }

    /// Refresh a user's tokens and store the result
    ///
    /// Does not add a sign-in entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AuthError::Authentication`] if the refresh
    /// token is rejected, or a database error from the store
    #[tracing::instrument(skip(self, refresh_token))]
    pub async fn refresh_session(&self, user_id: i64, refresh_token: &str) -> AuthResult<UserToken> {
        let token = self.provider.refresh(refresh_token).await?;
        let stored = self.store.store_token(user_id, &token).await?;

        tracing::debug!(user_id, "Tokens refreshed");
        Ok(stored)
    }

    /// The underlying provider
    #[must_use]
    pub const fn provider(&self) -> &CognitoProvider {
        &self.provider
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
