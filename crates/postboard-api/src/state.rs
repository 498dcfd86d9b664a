//! Shared application state passed to every handler.

use std::sync::Arc;

use postboard_auth::{
    AuthenticationGate, AuthorizationGate, CredentialStore, PermissionIndex, RateLimiter,
};
use postboard_core::config::AppConfig;
use postboard_database::Stores;
use postboard_service::{PostService, UserService};
use postboard_worker::{Notifier, TaskSupervisor};

/// Everything a request may need, cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Bearer-token authentication.
    pub authentication: AuthenticationGate,
    /// Activation and capability checks.
    pub authorization: AuthorizationGate,
    /// Per-client admission control.
    pub rate_limiter: Arc<RateLimiter>,
    /// Background work tracker.
    pub supervisor: TaskSupervisor,
    /// Account lifecycle.
    pub users: UserService,
    /// Posts.
    pub posts: PostService,
}

impl AppState {
    /// Wire gates and services over `stores`.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        supervisor: TaskSupervisor,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let credentials = Arc::new(CredentialStore::new(stores.tokens.clone()));
        let permissions = PermissionIndex::new(stores.permissions.clone());

        let authentication =
            AuthenticationGate::new(credentials.clone(), config.auth.max_token_length);
        let authorization = AuthorizationGate::new(permissions.clone());
        let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));

        let users = UserService::new(
            stores.users.clone(),
            credentials,
            permissions,
            supervisor.clone(),
            notifier,
            config.auth.clone(),
        );
        let posts = PostService::new(stores.posts.clone());

        Self {
            config: Arc::new(config),
            authentication,
            authorization,
            rate_limiter,
            supervisor,
            users,
            posts,
        }
    }
}
