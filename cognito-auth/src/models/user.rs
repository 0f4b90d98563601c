//! Local user record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::oauth2::CognitoUserInfo;

/// User signed in through Cognito
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Primary key
    pub id: i64,
    /// Cognito subject
    pub cognito_sub: String,
    /// Email address (unique)
    pub email: String,
    /// Display name
    pub name: Option<String>,
    /// When the user first signed in
    pub created_at: DateTime<Utc>,
    /// When the user record last changed
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Insert the user or refresh the existing row with the same email
    ///
    /// The subject is always replaced; the name only when Cognito sent one.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn upsert_by_email(
        pool: &PgPool,
        user_info: &CognitoUserInfo,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r"
            INSERT INTO users (cognito_sub, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (email)
            DO UPDATE SET
                cognito_sub = EXCLUDED.cognito_sub,
                name = COALESCE(EXCLUDED.name, users.name),
                updated_at = NOW()
            RETURNING id, cognito_sub, email, name, created_at, updated_at
            ",
        )
        .bind(&user_info.sub)
        .bind(&user_info.email)
        .bind(user_info.display_name())
        .fetch_one(pool)
        .await
    }

    /// Find a user by ID
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r"
            SELECT id, cognito_sub, email, name, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a user by email
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r"
            SELECT id, cognito_sub, email, name, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDatabase;

    fn user_info(sub: &str, email: &str, name: Option<&str>) -> CognitoUserInfo {
        CognitoUserInfo {
            sub: sub.to_string(),
            email: email.to_string(),
            email_verified: true,
            name: name.map(str::to_string),
            username: None,
            given_name: None,
            family_name: None,
            picture: None,
        }
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL database"]
    async fn test_upsert_by_email_inserts_then_updates() {
        let test_db = TestDatabase::new().await.unwrap();
        let pool = test_db.pool();

        let created = User::upsert_by_email(pool, &user_info("sub-1", "ada@example.com", Some("Ada")))
            .await
            .unwrap();
        assert_eq!(created.cognito_sub, "sub-1");
        assert_eq!(created.name.as_deref(), Some("Ada"));

        let updated = User::upsert_by_email(pool, &user_info("sub-2", "ada@example.com", None))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.cognito_sub, "sub-2");
        assert_eq!(updated.name.as_deref(), Some("Ada"));

        let found = User::find_by_email(pool, "ada@example.com").await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL database"]
    async fn test_find_by_id_missing() {
        let test_db = TestDatabase::new().await.unwrap();

        let found = User::find_by_id(test_db.pool(), 42).await.unwrap();
        assert!(found.is_none());
    }
}
