//! Resolves the principal behind an `Authorization` header.

use std::sync::Arc;

use tracing::debug;

use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_entity::token::TokenScope;
use postboard_entity::user::Principal;

use crate::token::CredentialStore;

/// Turns an optional `Authorization` header into a [`Principal`].
///
/// - no header: [`Principal::Anonymous`]
/// - not exactly `Bearer <token>`, or a token longer than the configured
///   maximum: `InvalidToken`, without touching the store
/// - no unexpired `authentication` token with that hash: `InvalidToken`
#[derive(Debug, Clone)]
pub struct AuthenticationGate {
    credentials: Arc<CredentialStore>,
    max_token_length: usize,
}

impl AuthenticationGate {
    /// Creates a gate resolving tokens through `credentials`.
    pub fn new(credentials: Arc<CredentialStore>, max_token_length: usize) -> Self {
        Self {
            credentials,
            max_token_length,
        }
    }

    /// Resolve the principal for a request.
    pub async fn authenticate(&self, header: Option<&str>) -> AppResult<Principal> {
        let Some(header) = header else {
            return Ok(Principal::Anonymous);
        };

        let token = match header.split(' ').collect::<Vec<_>>().as_slice() {
            ["Bearer", token] => *token,
            _ => return Err(AppError::invalid_token()),
        };

        if token.is_empty() || token.len() > self.max_token_length {
            debug!(length = token.len(), "Rejected bearer token before lookup");
            return Err(AppError::invalid_token());
        }

        match self
            .credentials
            .resolve_token(token, TokenScope::Authentication)
            .await?
        {
            Some(user) => Ok(Principal::User(user)),
            None => Err(AppError::invalid_token()),
        }
    }
}
