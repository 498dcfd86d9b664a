//! Maps a user to the capability codes they hold.

use std::sync::Arc;

use postboard_core::result::AppResult;
use postboard_database::store::PermissionStore;
use postboard_entity::permission::Permissions;

/// Capability lookups against the backing store.
///
/// Nothing is cached: every check reads the store so a revoked grant takes
/// effect on the very next request.
#[derive(Clone)]
pub struct PermissionIndex {
    store: Arc<dyn PermissionStore>,
}

impl std::fmt::Debug for PermissionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionIndex").finish()
    }
}

impl PermissionIndex {
    /// Creates an index over `store`.
    pub fn new(store: Arc<dyn PermissionStore>) -> Self {
        Self { store }
    }

    /// All codes held by `user_id`.
    pub async fn codes_for(&self, user_id: i64) -> AppResult<Permissions> {
        self.store.codes_for_user(user_id).await
    }

    /// Whether `user_id` holds `code`.
    pub async fn holds(&self, user_id: i64, code: &str) -> AppResult<bool> {
        Ok(self.codes_for(user_id).await?.include(code))
    }

    /// Grant `codes` to `user_id`. Used by provisioning paths such as registration.
    pub async fn grant(&self, user_id: i64, codes: &[String]) -> AppResult<()> {
        self.store.grant(user_id, codes).await
    }
}
