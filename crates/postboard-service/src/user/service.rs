//! User lifecycle operations.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use tracing::info;

use postboard_auth::permission::PermissionIndex;
use postboard_auth::token::CredentialStore;
use postboard_core::config::AuthConfig;
use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_database::store::UserStore;
use postboard_entity::token::{AccessToken, TokenScope};
use postboard_entity::user::{NewUser, User};
use postboard_worker::{Notifier, TaskSupervisor};

/// Validated input for a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Handles account registration, activation and login.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    credentials: Arc<CredentialStore>,
    permissions: PermissionIndex,
    supervisor: TaskSupervisor,
    notifier: Arc<dyn Notifier>,
    config: AuthConfig,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        credentials: Arc<CredentialStore>,
        permissions: PermissionIndex,
        supervisor: TaskSupervisor,
        notifier: Arc<dyn Notifier>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            credentials,
            permissions,
            supervisor,
            notifier,
            config,
        }
    }

    /// Create an inactive account, grant the default capabilities, and send
    /// the activation token in a background welcome notification.
    pub async fn register(&self, input: Registration) -> AppResult<User> {
        let password_hash = self.credentials.hash_password(&input.password)?;
        let user = self
            .users
            .insert(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                activated: false,
            })
            .await?;

        self.permissions
            .grant(user.id, &self.config.default_permissions)
            .await?;

        let token = self
            .credentials
            .issue_token(
                user.id,
                Duration::hours(self.config.activation_token_ttl_hours),
                TokenScope::Activation,
            )
            .await?;

        let notifier = self.notifier.clone();
        let recipient = user.email.clone();
        let data = json!({
            "activation_token": token.plaintext,
            "user_id": user.id,
        });
        self.supervisor.spawn("welcome_notification", async move {
            notifier.send(&recipient, "user_welcome", data).await
        });

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Activate the account behind an activation token and revoke every
    /// activation token the account still has.
    pub async fn activate(&self, plaintext: &str) -> AppResult<User> {
        let mut user = self
            .credentials
            .resolve_token(plaintext, TokenScope::Activation)
            .await?
            .ok_or_else(|| AppError::invalid_field("token", "invalid or expired activation token"))?;

        user.activated = true;
        self.users.update(&mut user).await?;

        self.credentials
            .revoke_all(user.id, TokenScope::Activation)
            .await?;

        info!(user_id = user.id, "User activated");
        Ok(user)
    }

    /// Exchange an email and password for an authentication token.
    ///
    /// An unknown email and a wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AccessToken> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !self
            .credentials
            .verify_password(password, &user.password_hash)?
        {
            return Err(AppError::invalid_credentials());
        }

        let token = self
            .credentials
            .issue_token(
                user.id,
                Duration::hours(self.config.authentication_token_ttl_hours),
                TokenScope::Authentication,
            )
            .await?;

        info!(user_id = user.id, "Authentication token issued");
        Ok(token)
    }
}
