//! Token handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use postboard_entity::token::AccessToken;

use crate::dto::request::LoginRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /v1/tokens/authentication
pub async fn create_authentication_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccessToken>>), ApiError> {
    let token = state.users.login(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(token))))
}
