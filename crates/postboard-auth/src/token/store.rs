//! Credential lifecycle: password checks and token issuance, lookup and revocation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use postboard_core::result::AppResult;
use postboard_database::store::TokenStore;
use postboard_entity::token::{AccessToken, TokenScope};
use postboard_entity::user::User;

use super::generator::{generate, hash_plaintext};
use crate::password::PasswordHasher;

/// Owns password hashing and the opaque-token lifecycle.
///
/// Tokens are never updated: they are issued, looked up by hash and scope,
/// and deleted in bulk once their purpose is consumed.
#[derive(Clone)]
pub struct CredentialStore {
    tokens: Arc<dyn TokenStore>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish()
    }
}

impl CredentialStore {
    /// Creates a credential store over `tokens`.
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            tokens,
            hasher: PasswordHasher::new(),
        }
    }

    /// Issue and persist a token. The returned value is the only place the plaintext appears.
    pub async fn issue_token(
        &self,
        user_id: i64,
        ttl: Duration,
        scope: TokenScope,
    ) -> AppResult<AccessToken> {
        let token = generate(user_id, ttl, scope)?;
        self.tokens.insert(&token).await?;
        debug!(user_id, scope = %scope, expiry = %token.expiry, "Issued token");
        Ok(token)
    }

    /// Owner of an unexpired token of exactly `scope`, or `None`.
    pub async fn resolve_token(&self, plaintext: &str, scope: TokenScope) -> AppResult<Option<User>> {
        let hash = hash_plaintext(plaintext);
        self.tokens.find_user(&hash, scope, Utc::now()).await
    }

    /// Delete every token of `scope` owned by `user_id`.
    pub async fn revoke_all(&self, user_id: i64, scope: TokenScope) -> AppResult<u64> {
        let removed = self.tokens.delete_all_for_user(user_id, scope).await?;
        debug!(user_id, scope = %scope, removed, "Revoked tokens");
        Ok(removed)
    }

    /// Hash a new password.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        self.hasher.hash(password)
    }

    /// Compare a password with a stored hash. A mismatch is `Ok(false)`.
    pub fn verify_password(&self, password: &str, stored: &str) -> AppResult<bool> {
        self.hasher.verify(password, stored)
    }
}
