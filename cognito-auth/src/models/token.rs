//! Current tokens per user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::oauth2::OAuthToken;

/// The user's current Cognito tokens
///
/// There is at most one row per user; each sign-in overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserToken {
    /// Primary key
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Access token
    #[serde(skip_serializing)]
    pub access_token: String,
    /// Refresh token
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// ID token
    #[serde(skip_serializing)]
    pub id_token: Option<String>,
    /// Access token expiry
    pub expires_at: Option<DateTime<Utc>>,
    /// When the row was first written
    pub created_at: DateTime<Utc>,
    /// When the tokens were last replaced
    pub updated_at: DateTime<Utc>,
}

impl UserToken {
    /// Write the user's tokens, replacing any previous ones
    ///
    /// A missing refresh token keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn store(
        pool: &PgPool,
        user_id: i64,
        token: &OAuthToken,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r"
            INSERT INTO user_tokens (user_id, access_token, refresh_token, id_token, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id)
            DO UPDATE SET
                access_token = EXCLUDED.access_token,
                refresh_token = COALESCE(EXCLUDED.refresh_token, user_tokens.refresh_token),
                id_token = EXCLUDED.id_token,
                expires_at = EXCLUDED.expires_at,
                updated_at = NOW()
            RETURNING id, user_id, access_token, refresh_token, id_token, expires_at,
                      created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(&token.access_token)
        .bind(&token.refresh_token)
        .bind(&token.id_token)
        .bind(token.expires_at)
        .fetch_one(pool)
        .await
    }

    /// Find the tokens stored for a user
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r"
            SELECT id, user_id, access_token, refresh_token, id_token, expires_at,
                   created_at, updated_at
            FROM user_tokens
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
