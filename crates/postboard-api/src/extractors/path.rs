//! Typed path parameter helpers.

use postboard_core::error::AppError;

/// Parse a positive record id. Anything else is reported as not found.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::not_found()),
    }
}
