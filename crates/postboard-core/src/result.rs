//! Convenience result type alias for Postboard.

use crate::error::AppError;

/// A specialized `Result` type for Postboard operations.
pub type AppResult<T> = Result<T, AppError>;
