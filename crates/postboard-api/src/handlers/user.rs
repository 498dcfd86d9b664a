//! Account handlers: register and activate.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use postboard_entity::user::User;
use postboard_service::user::Registration;

use crate::dto::request::{ActivateUserRequest, RegisterUserRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /v1/users
///
/// Accepted rather than created: the welcome notification is still in flight.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = state
        .users
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok((StatusCode::ACCEPTED, Json(ApiResponse::ok(user))))
}

/// PUT /v1/users/activated
pub async fn activate(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ActivateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.users.activate(&req.token).await?;
    Ok(Json(ApiResponse::ok(user)))
}
