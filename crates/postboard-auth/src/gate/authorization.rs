//! Authorization checks layered over a resolved principal.
//!
//! Each check implies the one before it:
//! `require_permission` ⊃ `require_activated` ⊃ `require_authenticated`.

use tracing::debug;

use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_entity::user::{Principal, User};

use crate::permission::PermissionIndex;

/// Admits or denies a principal before a handler runs.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    permissions: PermissionIndex,
}

impl AuthorizationGate {
    /// Creates a gate consulting `permissions` for capability checks.
    pub fn new(permissions: PermissionIndex) -> Self {
        Self { permissions }
    }

    /// Reject the anonymous principal.
    pub fn require_authenticated<'a>(&self, principal: &'a Principal) -> AppResult<&'a User> {
        principal.user().ok_or_else(AppError::authentication_required)
    }

    /// Reject principals whose account is not activated.
    pub fn require_activated<'a>(&self, principal: &'a Principal) -> AppResult<&'a User> {
        let user = self.require_authenticated(principal)?;
        if !user.activated {
            return Err(AppError::account_inactive());
        }
        Ok(user)
    }

    /// Reject principals that do not hold `code`. Reads the store on every call.
    pub async fn require_permission<'a>(
        &self,
        principal: &'a Principal,
        code: &str,
    ) -> AppResult<&'a User> {
        let user = self.require_activated(principal)?;
        if !self.permissions.holds(user.id, code).await? {
            debug!(user_id = user.id, code, "Capability missing");
            return Err(AppError::not_permitted());
        }
        Ok(user)
    }
}
