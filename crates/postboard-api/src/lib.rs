//! # postboard-api
//!
//! HTTP API layer for Postboard built on Axum.
//!
//! Provides the `/v1` REST endpoints, the request pipeline (rate limiting,
//! panic recovery, authentication, CORS, logging), extractors that enforce
//! authorization, DTOs, error mapping, and graceful serving.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
