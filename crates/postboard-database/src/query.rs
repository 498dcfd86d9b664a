//! Bounded execution of store calls.

use std::future::Future;
use std::time::Duration;

use postboard_core::error::{AppError, ErrorKind};
use postboard_core::result::AppResult;

/// Run a query future under `limit`.
///
/// Driver errors become [`ErrorKind::Database`] carrying `context`; an
/// elapsed deadline is reported the same way so the caller sees a server
/// error and nothing partial.
pub async fn bounded<T, F>(limit: Duration, context: &'static str, fut: F) -> AppResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(AppError::with_source(ErrorKind::Database, context, e)),
        Err(_) => Err(AppError::database(format!(
            "{context}: timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

/// Whether a driver error is a violation of the named unique constraint.
pub fn is_unique_violation(err: &AppError, constraint: &str) -> bool {
    let Some(source) = err.source.as_deref() else {
        return false;
    };
    source
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db| db.constraint())
        == Some(constraint)
}

/// `ILIKE` pattern matching `raw` as a literal substring.
///
/// Backslash is the default escape character, so it is escaped along with
/// the `%` and `_` wildcards.
pub fn contains_pattern(raw: &str) -> String {
    let mut pattern = String::with_capacity(raw.len() + 2);
    pattern.push('%');
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
