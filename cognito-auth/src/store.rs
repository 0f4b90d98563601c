//! Persistence seam for sign-in records
//!
//! [`AuthStore`] is what the service writes through after a successful
//! code exchange. [`PgAuthStore`] delegates to the models in [`crate::models`].

use async_trait::async_trait;
use sqlx::PgPool;
use std::net::IpAddr;

use crate::models::{LoginHistory, User, UserToken};
use crate::oauth2::{CognitoUserInfo, OAuthToken};

/// Storage for users, tokens and sign-in history
///
/// # Examples
///
/// ```rust,no_run
/// use cognito_auth::store::{AuthStore, PgAuthStore};
///
/// # async fn example(pool: sqlx::PgPool, info: cognito_auth::oauth2::CognitoUserInfo) -> Result<(), sqlx::Error> {
/// let store = PgAuthStore::new(pool);
/// let user = store.upsert_user(&info).await?;
/// store.record_login(user.id, None).await?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Insert or update the user identified by email
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the write fails
    async fn upsert_user(&self, user_info: &CognitoUserInfo) -> Result<User, sqlx::Error>;

    /// Replace the tokens held for a user
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the write fails
    async fn store_token(&self, user_id: i64, token: &OAuthToken) -> Result<UserToken, sqlx::Error>;

    /// Append a sign-in entry
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the write fails
    async fn record_login(
        &self,
        user_id: i64,
        ip_address: Option<IpAddr>,
    ) -> Result<LoginHistory, sqlx::Error>;
}

/// `PostgreSQL`-backed [`AuthStore`]
#[derive(Debug, Clone)]
pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    /// Wrap a connection pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AuthStore for PgAuthStore {
    async fn upsert_user(&self, user_info: &CognitoUserInfo) -> Result<User, sqlx::Error> {
        User::upsert_by_email(&self.pool, user_info).await
    }

    async fn store_token(&self, user_id: i64, token: &OAuthToken) -> Result<UserToken, sqlx::Error> {
        UserToken::store(&self.pool, user_id, token).await
    }

    async fn record_login(
        &self,
        user_id: i64,
        ip_address: Option<IpAddr>,
    ) -> Result<LoginHistory, sqlx::Error> {
        LoginHistory::record(&self.pool, user_id, ip_address).await
    }
}
