//! In-memory store.
//!
//! Implements every store trait behind a single async mutex. Updates use the
//! same compare-and-increment rule as the SQL repositories, so concurrent
//! editors observe identical outcomes against either backend.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_entity::permission::Permissions;
use postboard_entity::post::{NewPost, Post, PostFilter, PostSort};
use postboard_entity::token::{AccessToken, TokenScope};
use postboard_entity::user::{NewUser, User};
use postboard_entity::version::{INITIAL_VERSION, Versioned};

use crate::store::{PermissionStore, PostStore, TokenStore, UserStore};

#[derive(Debug, Clone)]
struct StoredToken {
    hash: Vec<u8>,
    user_id: i64,
    expiry: DateTime<Utc>,
    scope: TokenScope,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tokens: Vec<StoredToken>,
    grants: HashMap<i64, BTreeSet<String>>,
    posts: BTreeMap<i64, Post>,
    next_user_id: i64,
    next_post_id: i64,
}

/// Shared in-memory backend. Cloning yields a handle to the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the expiry of the token with `hash` to `expiry`.
    ///
    /// Returns `false` if no such token exists.
    pub async fn set_token_expiry(&self, hash: &[u8], expiry: DateTime<Utc>) -> bool {
        let mut tables = self.tables.lock().await;
        let mut found = false;
        for token in tables.tokens.iter_mut().filter(|t| t.hash == hash) {
            token.expiry = expiry;
            found = true;
        }
        found
    }

    /// Number of stored tokens of `scope` owned by `user_id`.
    pub async fn token_count(&self, user_id: i64, scope: TokenScope) -> usize {
        let tables = self.tables.lock().await;
        tables
            .tokens
            .iter()
            .filter(|t| t.user_id == user_id && t.scope == scope)
            .count()
    }
}

/// Replace `record` in `table` if its version still matches, bumping it by one.
fn compare_and_increment<T>(table: &mut BTreeMap<i64, T>, record: &mut T) -> AppResult<()>
where
    T: Versioned + Clone,
{
    match table.get(&record.id()) {
        Some(current) if current.version() == record.version() => {
            record.set_version(record.version() + 1);
            table.insert(record.id(), record.clone());
            Ok(())
        }
        _ => Err(AppError::edit_conflict()),
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.lock().await;
        let email = user.email.to_lowercase();
        if tables.users.values().any(|u| u.email == email) {
            return Err(AppError::invalid_field(
                "email",
                "a user with this email address already exists",
            ));
        }
        tables.next_user_id += 1;
        let created = User {
            id: tables.next_user_id,
            created_at: Utc::now(),
            name: user.name,
            email,
            password_hash: user.password_hash,
            activated: user.activated,
            version: INITIAL_VERSION,
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &mut User) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        user.email = user.email.to_lowercase();
        let taken = tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email);
        if taken {
            return Err(AppError::invalid_field(
                "email",
                "a user with this email address already exists",
            ));
        }
        compare_and_increment(&mut tables.users, user)
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn insert(&self, token: &AccessToken) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        tables.tokens.push(StoredToken {
            hash: token.hash.clone(),
            user_id: token.user_id,
            expiry: token.expiry,
            scope: token.scope,
        });
        Ok(())
    }

    async fn find_user(
        &self,
        hash: &[u8],
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        let owner = tables
            .tokens
            .iter()
            .find(|t| t.hash == hash && t.scope == scope && t.expiry > now)
            .and_then(|t| tables.users.get(&t.user_id))
            .cloned();
        Ok(owner)
    }

    async fn delete_all_for_user(&self, user_id: i64, scope: TokenScope) -> AppResult<u64> {
        let mut tables = self.tables.lock().await;
        let before = tables.tokens.len();
        tables
            .tokens
            .retain(|t| !(t.user_id == user_id && t.scope == scope));
        Ok((before - tables.tokens.len()) as u64)
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn codes_for_user(&self, user_id: i64) -> AppResult<Permissions> {
        let tables = self.tables.lock().await;
        let codes = tables
            .grants
            .get(&user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        Ok(Permissions(codes))
    }

    async fn grant(&self, user_id: i64, codes: &[String]) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        tables
            .grants
            .entry(user_id)
            .or_default()
            .extend(codes.iter().cloned());
        Ok(())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, post: NewPost) -> AppResult<Post> {
        let mut tables = self.tables.lock().await;
        tables.next_post_id += 1;
        let created = Post {
            id: tables.next_post_id,
            created_at: Utc::now(),
            title: post.title,
            body: post.body,
            tags: post.tags,
            version: INITIAL_VERSION,
        };
        tables.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i64) -> AppResult<Option<Post>> {
        let tables = self.tables.lock().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn update(&self, post: &mut Post) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        compare_and_increment(&mut tables.posts, post)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        Ok(tables.posts.remove(&id).is_some())
    }

    async fn list(&self, filter: &PostFilter) -> AppResult<(Vec<Post>, i64)> {
        let tables = self.tables.lock().await;
        let mut matching: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        match filter.sort {
            PostSort::IdAsc => matching.sort_by_key(|p| p.id),
            PostSort::IdDesc => matching.sort_by(|a, b| b.id.cmp(&a.id)),
            PostSort::TitleAsc => {
                matching.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)))
            }
            PostSort::TitleDesc => {
                matching.sort_by(|a, b| b.title.cmp(&a.title).then(a.id.cmp(&b.id)))
            }
        }

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(filter.offset()).unwrap_or(usize::MAX))
            .take(filter.page_size as usize)
            .collect();
        Ok((page, total))
    }
}
