//! Store traits consumed by the auth and service layers.
//!
//! Every mutable record goes through a conditional write: `update` takes the
//! record as last observed by the caller, succeeds only if the persisted
//! version still matches, and writes the incremented version back into the
//! record. A mismatch (or a record that no longer exists) is reported as
//! [`ErrorKind::EditConflict`](postboard_core::ErrorKind::EditConflict).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use postboard_core::result::AppResult;
use postboard_entity::permission::Permissions;
use postboard_entity::post::{NewPost, Post, PostFilter};
use postboard_entity::token::{AccessToken, TokenScope};
use postboard_entity::user::{NewUser, User};

use crate::memory::MemoryStore;
use crate::repositories::{
    PermissionRepository, PostRepository, TokenRepository, UserRepository,
};

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user with version 1. A taken email is a validation error on `email`.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Find a user by (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Conditionally write `user`, advancing its version on success.
    async fn update(&self, user: &mut User) -> AppResult<()>;
}

/// Persistence for hashed access tokens.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Persist the hash, owner, expiry and scope of a token.
    async fn insert(&self, token: &AccessToken) -> AppResult<()>;

    /// Owner of a token matching `hash` and `scope` that expires after `now`.
    async fn find_user(
        &self,
        hash: &[u8],
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>>;

    /// Delete every token of `scope` owned by `user_id`. Returns the count removed.
    async fn delete_all_for_user(&self, user_id: i64, scope: TokenScope) -> AppResult<u64>;
}

/// The user/capability association.
#[async_trait]
pub trait PermissionStore: Send + Sync + 'static {
    /// Codes held by `user_id`.
    async fn codes_for_user(&self, user_id: i64) -> AppResult<Permissions>;

    /// Grant `codes` to `user_id`. Already-held codes are ignored.
    async fn grant(&self, user_id: i64, codes: &[String]) -> AppResult<()>;
}

/// Persistence for posts.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// Insert a post with a fresh id and version 1.
    async fn insert(&self, post: NewPost) -> AppResult<Post>;

    /// Fetch a post by id.
    async fn get(&self, id: i64) -> AppResult<Option<Post>>;

    /// Conditionally write `post`, advancing its version on success.
    async fn update(&self, post: &mut Post) -> AppResult<()>;

    /// Delete unconditionally. Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// One page of posts matching `filter`, with the total match count.
    async fn list(&self, filter: &PostFilter) -> AppResult<(Vec<Post>, i64)>;
}

/// The full set of stores the application runs against.
#[derive(Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Access tokens.
    pub tokens: Arc<dyn TokenStore>,
    /// Capability grants.
    pub permissions: Arc<dyn PermissionStore>,
    /// Posts.
    pub posts: Arc<dyn PostStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing `pool`, each call bounded by `query_timeout`.
    pub fn postgres(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone(), query_timeout)),
            tokens: Arc::new(TokenRepository::new(pool.clone(), query_timeout)),
            permissions: Arc::new(PermissionRepository::new(pool.clone(), query_timeout)),
            posts: Arc::new(PostRepository::new(pool, query_timeout)),
        }
    }

    /// Stores backed by a single shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            tokens: Arc::new(store.clone()),
            permissions: Arc::new(store.clone()),
            posts: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
