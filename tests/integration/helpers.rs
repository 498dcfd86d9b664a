//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use postboard_api::AppState;
use postboard_core::config::AppConfig;
use postboard_core::result::AppResult;
use postboard_database::{MemoryStore, PermissionStore, Stores};
use postboard_entity::permission::POSTS_WRITE;
use postboard_worker::{Notifier, TaskSupervisor};

/// Notifier that keeps every message for inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String, Value)>>,
}

impl RecordingNotifier {
    /// Activation token from the most recent welcome message to `email`.
    pub fn activation_token_for(&self, email: &str) -> Option<String> {
        let sent = self.sent.lock().expect("notifier lock poisoned");
        sent.iter()
            .rev()
            .find(|(recipient, template, _)| recipient == email && template == "user_welcome")
            .and_then(|(_, _, data)| data["activation_token"].as_str().map(str::to_string))
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, recipient: &str, template: &str, data: Value) -> AppResult<()> {
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .push((recipient.to_string(), template.to_string(), data));
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state the router was built from
    pub state: AppState,
    /// Stores behind the state, for direct setup
    pub stores: Stores,
    /// Captured welcome notifications
    pub notifier: Arc<RecordingNotifier>,
    /// Background work tracker
    pub supervisor: TaskSupervisor,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self::with_stores(config, Stores::memory(MemoryStore::new()))
    }

    /// Create a test application over caller-supplied stores
    pub fn with_stores(config: AppConfig, stores: Stores) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        let supervisor = TaskSupervisor::new();

        let state = AppState::new(
            config,
            stores.clone(),
            supervisor.clone(),
            notifier.clone(),
        );
        let router = postboard_api::build_app(state.clone());

        Self {
            router,
            state,
            stores,
            notifier,
            supervisor,
        }
    }

    /// Register an account and return its id
    pub async fn register(&self, name: &str, email: &str, password: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/v1/users",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::ACCEPTED,
            "Registration failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_i64()
            .expect("No id in registration response")
    }

    /// Wait for the welcome notification to `email` and return its token
    pub async fn activation_token(&self, email: &str) -> String {
        for _ in 0..100 {
            if let Some(token) = self.notifier.activation_token_for(email) {
                return token;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("No welcome notification sent to {email}");
    }

    /// Activate the account that received the welcome message at `email`
    pub async fn activate(&self, email: &str) {
        let token = self.activation_token(email).await;
        let response = self
            .request(
                "PUT",
                "/v1/users/activated",
                Some(serde_json::json!({ "token": token })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Activation failed: {:?}",
            response.body
        );
    }

    /// Login and return the authentication token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/v1/tokens/authentication",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Register, activate and log in a user holding only the default capabilities
    pub async fn reader(&self, email: &str) -> String {
        self.register("Reader", email, "pa55word-reader").await;
        self.activate(email).await;
        self.login(email, "pa55word-reader").await
    }

    /// Register, activate and log in a user who may also write posts
    pub async fn writer(&self, email: &str) -> String {
        let id = self.register("Writer", email, "pa55word-writer").await;
        self.activate(email).await;
        self.stores
            .permissions
            .grant(id, &[POSTS_WRITE.to_string()])
            .await
            .expect("Failed to grant posts:write");
        self.login(email, "pa55word-writer").await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body, token, &[], None).await
    }

    /// Make an HTTP request with extra headers and an optional peer address
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
        peer: Option<SocketAddr>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let mut req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        if let Some(addr) = peer {
            req.extensions_mut().insert(ConnectInfo(addr));
        }

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Machine-readable error code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
