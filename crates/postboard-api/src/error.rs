//! Maps domain `AppError` to HTTP responses.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use postboard_core::error::{AppError, ErrorKind};

/// Message returned for every server-class failure.
pub const SERVER_ERROR_MESSAGE: &str = "something went wrong";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Per-field messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

/// Internal detail of a server-class error, attached to the response
/// extensions so the logging middleware can record it with request context.
#[derive(Debug, Clone)]
pub struct ServerErrorContext(pub String);

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::InvalidCredentials
        | ErrorKind::InvalidToken
        | ErrorKind::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        ErrorKind::AccountInactive | ErrorKind::NotPermitted => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::EditConflict => StatusCode::CONFLICT,
        ErrorKind::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Internal | ErrorKind::Database | ErrorKind::Configuration => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        if err.kind.is_server_error() {
            let detail = match &err.source {
                Some(source) => format!("{err}: {source}"),
                None => err.to_string(),
            };
            let body = ApiErrorResponse {
                error: "INTERNAL_ERROR".to_string(),
                message: SERVER_ERROR_MESSAGE.to_string(),
                details: None,
            };
            let mut response = (status, Json(body)).into_response();
            response.extensions_mut().insert(ServerErrorContext(detail));
            return response;
        }

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
            details: err.details,
        };
        let mut response = (status, Json(body)).into_response();
        if err.kind == ErrorKind::InvalidToken {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
