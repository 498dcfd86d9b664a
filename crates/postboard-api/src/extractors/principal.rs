//! Authorization extractors.
//!
//! Handlers name the check they need in their signature. A handler that
//! takes `Permitted<PostsWrite>` cannot run unless the principal is an
//! activated user holding `posts:write`, and it receives that user.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use postboard_core::error::AppError;
use postboard_entity::permission::{POSTS_READ, POSTS_WRITE};
use postboard_entity::user::{Principal, User};

use crate::error::ApiError;
use crate::state::AppState;

/// The principal attached by the authentication middleware.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Self)
            .ok_or_else(|| ApiError(AppError::internal("request reached a handler unauthenticated")))
    }
}

/// A capability code that can gate a handler.
pub trait Capability: Send + Sync + 'static {
    /// The code the principal must hold.
    const CODE: &'static str;
}

/// `posts:read`.
#[derive(Debug, Clone, Copy)]
pub struct PostsRead;

impl Capability for PostsRead {
    const CODE: &'static str = POSTS_READ;
}

/// `posts:write`.
#[derive(Debug, Clone, Copy)]
pub struct PostsWrite;

impl Capability for PostsWrite {
    const CODE: &'static str = POSTS_WRITE;
}

/// An activated user holding capability `C`.
#[derive(Debug, Clone)]
pub struct Permitted<C: Capability> {
    /// The admitted user.
    pub user: User,
    _capability: PhantomData<C>,
}

impl<C: Capability> FromRequestParts<AppState> for Permitted<C> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentPrincipal(principal) = CurrentPrincipal::from_request_parts(parts, state).await?;
        let user = state
            .authorization
            .require_permission(&principal, C::CODE)
            .await?;
        Ok(Self {
            user: user.clone(),
            _capability: PhantomData,
        })
    }
}
