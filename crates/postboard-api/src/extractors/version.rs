//! `X-Expected-Version` precondition header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use postboard_core::error::AppError;

use crate::error::ApiError;

/// Header carrying the version the client last saw.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

/// Optional decimal version the client asserts before an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpectedVersion(pub Option<i32>);

impl ExpectedVersion {
    /// Parse the raw header value, if present.
    pub fn parse(raw: Option<&[u8]>) -> Result<Self, AppError> {
        let Some(raw) = raw else {
            return Ok(Self(None));
        };
        std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.trim().parse::<i32>().ok())
            .map(|v| Self(Some(v)))
            .ok_or_else(|| AppError::bad_request("X-Expected-Version header must be an integer"))
    }
}

impl<S> FromRequestParts<S> for ExpectedVersion
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(EXPECTED_VERSION_HEADER)
            .map(|v| v.as_bytes());
        Ok(Self::parse(raw)?)
    }
}
