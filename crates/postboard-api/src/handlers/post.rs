//! Post handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};

use postboard_entity::post::{Post, PostPage};

use crate::dto::request::{CreatePostRequest, UpdatePostRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{
    ExpectedVersion, Permitted, PostListQuery, PostsRead, PostsWrite, ValidatedJson, parse_id,
};
use crate::state::AppState;

/// GET /v1/posts
pub async fn list_posts(
    State(state): State<AppState>,
    _caller: Permitted<PostsRead>,
    PostListQuery(filter): PostListQuery,
) -> Result<Json<ApiResponse<PostPage>>, ApiError> {
    let page = state.posts.list(&filter).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /v1/posts
pub async fn create_post(
    State(state): State<AppState>,
    _caller: Permitted<PostsWrite>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<ApiResponse<Post>>), ApiError>
{
    let post = state.posts.create(req.into()).await?;
    let location = format!("/v1/posts/{}", post.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(ApiResponse::ok(post)),
    ))
}

/// GET /v1/posts/{id}
pub async fn show_post(
    State(state): State<AppState>,
    _caller: Permitted<PostsRead>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.posts.get(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// PATCH /v1/posts/{id}
///
/// An `X-Expected-Version` header that disagrees with the stored version is
/// a 409 before anything is written. Without it, the conditional write still
/// rejects a concurrent editor with 409.
pub async fn update_post(
    State(state): State<AppState>,
    _caller: Permitted<PostsWrite>,
    Path(id): Path<String>,
    ExpectedVersion(expected): ExpectedVersion,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .posts
        .update(parse_id(&id)?, expected, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// DELETE /v1/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    _caller: Permitted<PostsWrite>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.posts.delete(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "post successfully deleted".to_string(),
    })))
}
