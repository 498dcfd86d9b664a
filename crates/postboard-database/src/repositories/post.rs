//! Post repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_entity::post::{NewPost, Post, PostFilter};

use crate::query::{bounded, contains_pattern};
use crate::store::PostStore;

const POST_COLUMNS: &str = "id, created_at, title, body, tags, version";

/// Repository for posts.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn insert(&self, post: NewPost) -> AppResult<Post> {
        bounded(
            self.timeout,
            "Failed to insert post",
            sqlx::query_as::<_, Post>(&format!(
                "INSERT INTO posts (title, body, tags) VALUES ($1, $2, $3) RETURNING {POST_COLUMNS}"
            ))
            .bind(&post.title)
            .bind(&post.body)
            .bind(&post.tags)
            .fetch_one(&self.pool),
        )
        .await
    }

    async fn get(&self, id: i64) -> AppResult<Option<Post>> {
        if id < 1 {
            return Ok(None);
        }
        bounded(
            self.timeout,
            "Failed to fetch post",
            sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn update(&self, post: &mut Post) -> AppResult<()> {
        let version: Option<i32> = bounded(
            self.timeout,
            "Failed to update post",
            sqlx::query_scalar(
                "UPDATE posts \
                 SET title = $1, body = $2, tags = $3, version = version + 1 \
                 WHERE id = $4 AND version = $5 \
                 RETURNING version",
            )
            .bind(&post.title)
            .bind(&post.body)
            .bind(&post.tags)
            .bind(post.id)
            .bind(post.version)
            .fetch_optional(&self.pool),
        )
        .await?;

        let version = version.ok_or_else(AppError::edit_conflict)?;
        post.version = version;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        if id < 1 {
            return Ok(false);
        }
        let result = bounded(
            self.timeout,
            "Failed to delete post",
            sqlx::query("DELETE FROM posts WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: &PostFilter) -> AppResult<(Vec<Post>, i64)> {
        let title = filter.title.as_deref().map(contains_pattern);
        let predicate = "($1::text IS NULL OR title ILIKE $1) AND tags @> $2";

        let total: i64 = bounded(
            self.timeout,
            "Failed to count posts",
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM posts WHERE {predicate}"))
                .bind(title.as_deref())
                .bind(&filter.tags)
                .fetch_one(&self.pool),
        )
        .await?;

        let posts = bounded(
            self.timeout,
            "Failed to list posts",
            sqlx::query_as::<_, Post>(&format!(
                "SELECT {POST_COLUMNS} FROM posts WHERE {predicate} ORDER BY {} LIMIT $3 OFFSET $4",
                filter.sort.order_by()
            ))
            .bind(title.as_deref())
            .bind(&filter.tags)
            .bind(i64::from(filter.page_size))
            .bind(filter.offset())
            .fetch_all(&self.pool),
        )
        .await?;

        Ok((posts, total))
    }
}
