//! Token repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use postboard_core::result::AppResult;
use postboard_entity::token::{AccessToken, TokenScope};
use postboard_entity::user::User;

use crate::query::bounded;
use crate::store::TokenStore;

/// Repository for hashed access tokens.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: PgPool,
    timeout: Duration,
}

impl TokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl TokenStore for TokenRepository {
    async fn insert(&self, token: &AccessToken) -> AppResult<()> {
        bounded(
            self.timeout,
            "Failed to insert token",
            sqlx::query("INSERT INTO tokens (hash, user_id, expiry, scope) VALUES ($1, $2, $3, $4)")
                .bind(&token.hash)
                .bind(token.user_id)
                .bind(token.expiry)
                .bind(token.scope.as_str())
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn find_user(
        &self,
        hash: &[u8],
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        bounded(
            self.timeout,
            "Failed to resolve token",
            sqlx::query_as::<_, User>(
                "SELECT users.id, users.created_at, users.name, users.email, \
                        users.password_hash, users.activated, users.version \
                 FROM users \
                 INNER JOIN tokens ON users.id = tokens.user_id \
                 WHERE tokens.hash = $1 AND tokens.scope = $2 AND tokens.expiry > $3",
            )
            .bind(hash)
            .bind(scope.as_str())
            .bind(now)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn delete_all_for_user(&self, user_id: i64, scope: TokenScope) -> AppResult<u64> {
        let result = bounded(
            self.timeout,
            "Failed to delete tokens",
            sqlx::query("DELETE FROM tokens WHERE scope = $1 AND user_id = $2")
                .bind(scope.as_str())
                .bind(user_id)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected())
    }
}
