//! Append-only sign-in log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::net::IpAddr;

/// One successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LoginHistory {
    /// Primary key
    pub id: i64,
    /// User who signed in
    pub user_id: i64,
    /// Client address, when known
    pub ip_address: Option<String>,
    /// When the sign-in happened
    pub logged_in_at: DateTime<Utc>,
}

impl LoginHistory {
    /// Append a sign-in entry
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn record(
        pool: &PgPool,
        user_id: i64,
        ip_address: Option<IpAddr>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r"
            INSERT INTO login_history (user_id, ip_address)
            VALUES ($1, $2)
            RETURNING id, user_id, ip_address, logged_in_at
            ",
        )
        .bind(user_id)
        .bind(ip_address.map(|ip| ip.to_string()))
        .fetch_one(pool)
        .await
    }

    /// Most recent sign-ins for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r"
            SELECT id, user_id, ip_address, logged_in_at
            FROM login_history
            WHERE user_id = $1
            ORDER BY logged_in_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Delete entries older than `cutoff`, returning how many were removed
    ///
    /// The log is never trimmed implicitly.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn prune_before(pool: &PgPool, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM login_history WHERE logged_in_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::oauth2::CognitoUserInfo;
    use crate::testing::TestDatabase;
    use chrono::Duration;

    async fn create_user(pool: &PgPool) -> User {
        User::upsert_by_email(
            pool,
            &CognitoUserInfo {
                sub: "sub-history".to_string(),
                email: "history@example.com".to_string(),
                email_verified: false,
                name: None,
                username: None,
                given_name: None,
                family_name: None,
                picture: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL database"]
    async fn test_record_appends_entries() {
        let test_db = TestDatabase::new().await.unwrap();
        let pool = test_db.pool();
        let user = create_user(pool).await;

        let ip: IpAddr = "203.0.113.9".parse().unwrap();
        LoginHistory::record(pool, user.id, Some(ip)).await.unwrap();
        LoginHistory::record(pool, user.id, None).await.unwrap();

        let entries = LoginHistory::find_by_user_id(pool, user.id, 10).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ip_address, None);
        assert_eq!(entries[1].ip_address.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL database"]
    async fn test_prune_before_removes_old_entries_only() {
        let test_db = TestDatabase::new().await.unwrap();
        let pool = test_db.pool();
        let user = create_user(pool).await;

        LoginHistory::record(pool, user.id, None).await.unwrap();
        sqlx::query("UPDATE login_history SET logged_in_at = NOW() - INTERVAL '90 days'")
            .execute(pool)
            .await
            .unwrap();
        LoginHistory::record(pool, user.id, None).await.unwrap();

        let removed = LoginHistory::prune_before(pool, Utc::now() - Duration::days(30))
            .await
            .unwrap();
        assert_eq!(removed, 1);

        let remaining = LoginHistory::find_by_user_id(pool, user.id, 10).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }
}
