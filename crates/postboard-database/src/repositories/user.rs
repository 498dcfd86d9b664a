//! User repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_entity::user::{NewUser, User};

use crate::query::{bounded, is_unique_violation};
use crate::store::UserStore;

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

fn duplicate_email(err: AppError) -> AppError {
    if is_unique_violation(&err, EMAIL_CONSTRAINT) {
        AppError::invalid_field("email", "a user with this email address already exists")
    } else {
        err
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: NewUser) -> AppResult<User> {
        bounded(
            self.timeout,
            "Failed to insert user",
            sqlx::query_as::<_, User>(
                "INSERT INTO users (name, email, password_hash, activated) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, created_at, name, email, password_hash, activated, version",
            )
            .bind(&user.name)
            .bind(user.email.to_lowercase())
            .bind(&user.password_hash)
            .bind(user.activated)
            .fetch_one(&self.pool),
        )
        .await
        .map_err(duplicate_email)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        bounded(
            self.timeout,
            "Failed to find user by email",
            sqlx::query_as::<_, User>(
                "SELECT id, created_at, name, email, password_hash, activated, version \
                 FROM users WHERE email = $1",
            )
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn update(&self, user: &mut User) -> AppResult<()> {
        let version: Option<i32> = bounded(
            self.timeout,
            "Failed to update user",
            sqlx::query_scalar(
                "UPDATE users \
                 SET name = $1, email = $2, password_hash = $3, activated = $4, \
                     version = version + 1 \
                 WHERE id = $5 AND version = $6 \
                 RETURNING version",
            )
            .bind(&user.name)
            .bind(user.email.to_lowercase())
            .bind(&user.password_hash)
            .bind(user.activated)
            .bind(user.id)
            .bind(user.version)
            .fetch_optional(&self.pool),
        )
        .await
        .map_err(duplicate_email)?;

        match version {
            Some(v) => {
                user.version = v;
                Ok(())
            }
            None => Err(AppError::edit_conflict()),
        }
    }
}
