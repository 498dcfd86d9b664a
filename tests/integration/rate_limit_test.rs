//! Integration tests for per-client admission control.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;

use postboard_core::config::AppConfig;

fn peer(addr: &str) -> Option<SocketAddr> {
    Some(addr.parse().expect("valid socket address"))
}

async fn healthcheck(app: &helpers::TestApp, from: Option<SocketAddr>) -> helpers::TestResponse {
    app.send("GET", "/v1/healthcheck", None, None, &[], from)
        .await
}

#[tokio::test(start_paused = true)]
async fn test_burst_then_refill() {
    let app = helpers::TestApp::new();
    let client = peer("203.0.113.7:50000");

    for i in 0..4 {
        let response = healthcheck(&app, client).await;
        assert_eq!(response.status, StatusCode::OK, "request {i}");
    }

    let rejected = healthcheck(&app, client).await;
    assert_eq!(rejected.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(rejected.error_code(), "RATE_LIMIT_EXCEEDED");

    tokio::time::advance(Duration::from_millis(500)).await;

    assert_eq!(healthcheck(&app, client).await.status, StatusCode::OK);
    assert_eq!(
        healthcheck(&app, client).await.status,
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test(start_paused = true)]
async fn test_clients_are_keyed_by_ip_only() {
    let app = helpers::TestApp::new();

    for _ in 0..4 {
        healthcheck(&app, peer("198.51.100.1:1000")).await;
    }

    let other_port = healthcheck(&app, peer("198.51.100.1:2000")).await;
    assert_eq!(other_port.status, StatusCode::TOO_MANY_REQUESTS);

    let other_ip = healthcheck(&app, peer("198.51.100.2:1000")).await;
    assert_eq!(other_ip.status, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn test_limit_applies_before_authentication() {
    let app = helpers::TestApp::new();
    let client = peer("192.0.2.10:4000");

    for _ in 0..4 {
        healthcheck(&app, client).await;
    }

    let response = app
        .send(
            "GET",
            "/v1/posts",
            None,
            Some("ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
            &[],
            client,
        )
        .await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_unknown_client_address_is_admitted() {
    let app = helpers::TestApp::new();

    for _ in 0..10 {
        assert_eq!(healthcheck(&app, None).await.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_disabled_limiter_admits_everything() {
    let mut config = AppConfig::default();
    config.rate_limit.enabled = false;
    let app = helpers::TestApp::with_config(config);
    let client = peer("203.0.113.99:80");

    for _ in 0..10 {
        assert_eq!(healthcheck(&app, client).await.status, StatusCode::OK);
    }
}
