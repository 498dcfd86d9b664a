//! Route definitions for the Postboard HTTP API.
//!
//! All routes are mounted under `/v1`. Layers, outermost first:
//! tracing, request logging, panic recovery, CORS, rate limiting,
//! authentication, body limit. Authorization happens in the handlers'
//! extractors, after authentication and before the body is read.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(token_routes())
        .merge(post_routes());

    Router::new()
        .nest("/v1", api_routes)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate::authenticate,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(CatchPanicLayer::custom(middleware::panic::handle_panic))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint (no gate)
fn health_routes() -> Router<AppState> {
    Router::new().route("/healthcheck", get(handlers::health::healthcheck))
}

/// Account registration and activation
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::register))
        .route("/users/activated", put(handlers::user::activate))
}

/// Token issuance
fn token_routes() -> Router<AppState> {
    Router::new().route(
        "/tokens/authentication",
        post(handlers::token::create_authentication_token),
    )
}

/// Posts CRUD
fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::post::list_posts).post(handlers::post::create_post),
        )
        .route(
            "/posts/{id}",
            get(handlers::post::show_post)
                .patch(handlers::post::update_post)
                .delete(handlers::post::delete_post),
        )
}
