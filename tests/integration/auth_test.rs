//! Integration tests for the account lifecycle and the authentication and
//! authorization gates.

mod helpers;

use axum::http::StatusCode;
use axum::http::header::{VARY, WWW_AUTHENTICATE};

#[tokio::test]
async fn test_healthcheck_is_public_and_varies_on_authorization() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/v1/healthcheck", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "available");
    assert_eq!(response.body["data"]["environment"], "development");
    assert_eq!(response.headers[VARY], "Authorization");
}

#[tokio::test]
async fn test_anonymous_request_to_protected_route() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/v1/posts", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "AUTHENTICATION_REQUIRED");
    assert!(response.headers.get(WWW_AUTHENTICATE).is_none());
}

#[tokio::test]
async fn test_unknown_token_is_challenged() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/v1/posts", None, Some("ABCDEFGHIJKLMNOPQRSTUVWXYZ"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
    assert_eq!(response.headers[WWW_AUTHENTICATE], "Bearer");
    assert_eq!(response.headers[VARY], "Authorization");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = helpers::TestApp::new();

    for header in ["Token abc", "Bearer", "Bearer a b", "bearer ABCDEFGHIJKLMNOPQRSTUVWXYZ"] {
        let response = app
            .send(
                "GET",
                "/v1/healthcheck",
                None,
                None,
                &[("Authorization", header)],
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "header {header:?}");
        assert_eq!(response.error_code(), "INVALID_TOKEN");
    }
}

#[tokio::test]
async fn test_overlong_token_is_rejected_without_lookup() {
    let app = helpers::TestApp::new();
    let long = "A".repeat(27);

    let response = app.request("GET", "/v1/posts", None, Some(&long)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_full_lifecycle_grants_read_access() {
    let app = helpers::TestApp::new();

    let token = app.reader("alice@example.com").await;
    assert_eq!(token.len(), 26);

    let response = app.request("GET", "/v1/posts", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["posts"], serde_json::json!([]));
}

#[tokio::test]
async fn test_inactive_account_is_forbidden() {
    let app = helpers::TestApp::new();
    app.register("Bob", "bob@example.com", "pa55word-bob").await;
    let token = app.login("bob@example.com", "pa55word-bob").await;

    let response = app.request("GET", "/v1/posts", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ACCOUNT_INACTIVE");
}

#[tokio::test]
async fn test_missing_capability_is_forbidden() {
    let app = helpers::TestApp::new();
    let token = app.reader("carol@example.com").await;

    let response = app
        .request(
            "POST",
            "/v1/posts",
            Some(serde_json::json!({ "title": "Hello", "body": "World" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "NOT_PERMITTED");
}

#[tokio::test]
async fn test_activation_token_does_not_authenticate() {
    let app = helpers::TestApp::new();
    app.register("Dave", "dave@example.com", "pa55word-dave").await;
    let activation = app.activation_token("dave@example.com").await;

    let response = app
        .request("GET", "/v1/posts", None, Some(&activation))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_activation_token_is_single_use() {
    let app = helpers::TestApp::new();
    app.register("Erin", "erin@example.com", "pa55word-erin").await;
    let activation = app.activation_token("erin@example.com").await;
    let body = serde_json::json!({ "token": activation });

    let first = app
        .request("PUT", "/v1/users/activated", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["activated"], true);
    assert_eq!(first.body["data"]["version"], 2);

    let second = app
        .request("PUT", "/v1/users/activated", Some(body), None)
        .await;
    assert_eq!(second.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        second.body["details"]["token"],
        "invalid or expired activation token"
    );
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = helpers::TestApp::new();
    app.register("Frank", "frank@example.com", "pa55word-frank").await;

    let response = app
        .request(
            "POST",
            "/v1/users",
            Some(serde_json::json!({
                "name": "Frank Again",
                "email": "frank@example.com",
                "password": "pa55word-frank",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["email"].is_string());
}

#[tokio::test]
async fn test_registration_validation() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/v1/users",
            Some(serde_json::json!({
                "name": "",
                "email": "not-an-email",
                "password": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    let details = &response.body["details"];
    assert!(details["name"].is_string());
    assert!(details["email"].is_string());
    assert!(details["password"].is_string());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let app = helpers::TestApp::new();
    app.register("Grace", "grace@example.com", "pa55word-grace").await;

    let wrong_password = app
        .request(
            "POST",
            "/v1/tokens/authentication",
            Some(serde_json::json!({
                "email": "grace@example.com",
                "password": "not-her-password",
            })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/v1/tokens/authentication",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "pa55word-grace",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = helpers::TestApp::new();

    let response = app
        .send(
            "POST",
            "/v1/tokens/authentication",
            None,
            None,
            &[],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/v1/nothing-here", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}
