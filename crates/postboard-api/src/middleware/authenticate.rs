//! Attaches the request's [`Principal`] before any handler runs.

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::{AUTHORIZATION, VARY};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use postboard_core::error::AppError;
use postboard_entity::user::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the bearer token (if any) into a [`Principal`] stored in the
/// request extensions. Every response, including rejections, varies on
/// `Authorization`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = match request.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => match value.to_str() {
            Ok(text) => Some(text.to_owned()),
            Err(_) => return with_vary(ApiError(AppError::invalid_token()).into_response()),
        },
    };

    let principal: Principal = match state.authentication.authenticate(header.as_deref()).await {
        Ok(principal) => principal,
        Err(e) => return with_vary(ApiError(e).into_response()),
    };

    request.extensions_mut().insert(principal);
    with_vary(next.run(request).await)
}

fn with_vary(mut response: Response) -> Response {
    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("Authorization"));
    response
}
