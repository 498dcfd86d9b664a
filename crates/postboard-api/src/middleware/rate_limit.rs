//! Per-client admission middleware.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::error;

use postboard_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Reject clients whose bucket is empty with 429.
///
/// Clients are keyed by source IP with the port dropped. When no source
/// address is available the request is logged as a server error and
/// admitted anyway.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.config.rate_limit.enabled {
        return next.run(request).await;
    }

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let Some(client) = client else {
        error!(
            method = %request.method(),
            path = %request.uri().path(),
            "Cannot determine client address; admitting without rate limiting"
        );
        return next.run(request).await;
    };

    if !state.rate_limiter.admit(&client).await {
        return ApiError(AppError::rate_limit_exceeded()).into_response();
    }

    next.run(request).await
}
