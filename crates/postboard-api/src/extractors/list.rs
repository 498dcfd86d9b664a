//! Query-string parsing for post listings.

use std::collections::BTreeMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use postboard_core::error::AppError;
use postboard_entity::post::{PostFilter, PostSort};

use crate::error::ApiError;

const MAX_PAGE: u32 = 10_000_000;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
struct RawListParams {
    title: Option<String>,
    tags: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
    sort: Option<String>,
}

/// Validated listing criteria from `?title=&tags=a,b&page=&page_size=&sort=`.
#[derive(Debug, Clone)]
pub struct PostListQuery(pub PostFilter);

impl PostListQuery {
    fn from_raw(raw: RawListParams) -> Result<Self, AppError> {
        let mut errors = BTreeMap::new();
        let defaults = PostFilter::default();

        let page = bounded_int(raw.page.as_deref(), defaults.page, 1, MAX_PAGE, "page", &mut errors);
        let page_size = bounded_int(
            raw.page_size.as_deref(),
            defaults.page_size,
            1,
            MAX_PAGE_SIZE,
            "page_size",
            &mut errors,
        );

        let sort = match raw.sort.as_deref() {
            None | Some("") => PostSort::default(),
            Some(value) => PostSort::parse(value).unwrap_or_else(|| {
                errors.insert("sort".to_string(), "invalid sort value".to_string());
                PostSort::default()
            }),
        };

        if !errors.is_empty() {
            return Err(AppError::failed_validation(errors));
        }

        let tags = raw
            .tags
            .as_deref()
            .map(|csv| {
                csv.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self(PostFilter {
            title: raw.title.filter(|t| !t.is_empty()),
            tags,
            page,
            page_size,
            sort,
        }))
    }
}

fn bounded_int(
    raw: Option<&str>,
    default: u32,
    min: u32,
    max: u32,
    field: &str,
    errors: &mut BTreeMap<String, String>,
) -> u32 {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return default;
    };
    match raw.parse::<u32>() {
        Ok(v) if v < min => {
            errors.insert(field.to_string(), format!("must be at least {min}"));
            default
        }
        Ok(v) if v > max => {
            errors.insert(field.to_string(), format!("must be a maximum of {max}"));
            default
        }
        Ok(v) => v,
        Err(_) => {
            errors.insert(field.to_string(), "must be an integer value".to_string());
            default
        }
    }
}

impl<S> FromRequestParts<S> for PostListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError(AppError::bad_request(e.body_text())))?;
        Ok(Self::from_raw(raw)?)
    }
}
