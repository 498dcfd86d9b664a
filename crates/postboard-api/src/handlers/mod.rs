//! Route handlers organized by domain.

pub mod health;
pub mod post;
pub mod token;
pub mod user;

use postboard_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::not_found())
}
