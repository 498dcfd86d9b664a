//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info};

use crate::error::ServerErrorContext;

/// Logs method, path, status and duration. Server-class failures are also
/// logged with their internal detail, which never reaches the client.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(ServerErrorContext(detail)) = response.extensions().get::<ServerErrorContext>() {
        error!(method = %method, path = %path, error = %detail, "Request failed");
    }

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "HTTP request"
    );

    response
}
