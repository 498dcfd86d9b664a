//! Permission repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use postboard_core::result::AppResult;
use postboard_entity::permission::Permissions;

use crate::query::bounded;
use crate::store::PermissionStore;

/// Repository for the `users_permissions` association.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl PermissionStore for PermissionRepository {
    async fn codes_for_user(&self, user_id: i64) -> AppResult<Permissions> {
        let codes: Vec<String> = bounded(
            self.timeout,
            "Failed to load permissions",
            sqlx::query_scalar(
                "SELECT permissions.code \
                 FROM permissions \
                 INNER JOIN users_permissions ON users_permissions.permission_id = permissions.id \
                 WHERE users_permissions.user_id = $1 \
                 ORDER BY permissions.code",
            )
            .bind(user_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(Permissions(codes))
    }

    async fn grant(&self, user_id: i64, codes: &[String]) -> AppResult<()> {
        bounded(
            self.timeout,
            "Failed to grant permissions",
            sqlx::query(
                "INSERT INTO users_permissions (user_id, permission_id) \
                 SELECT $1, permissions.id FROM permissions WHERE permissions.code = ANY($2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(codes)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}
