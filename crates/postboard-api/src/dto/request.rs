//! Request DTOs with validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use postboard_entity::post::{NewPost, PostPatch};

/// Account registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterUserRequest {
    /// Display name.
    #[validate(length(min = 1, max = 500, message = "must be provided and at most 500 bytes long"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, max = 72, message = "must be between 8 and 72 bytes long"))]
    pub password: String,
}

/// Account activation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ActivateUserRequest {
    /// Activation token plaintext.
    #[validate(length(min = 1, max = 26, message = "must be provided and at most 26 bytes long"))]
    pub token: String,
}

/// Login body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, max = 72, message = "must be between 8 and 72 bytes long"))]
    pub password: String,
}

/// New post body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    /// Title.
    #[validate(length(min = 1, max = 500, message = "must be provided and at most 500 bytes long"))]
    pub title: String,
    /// Body text.
    #[validate(length(min = 1, message = "must be provided"))]
    pub body: String,
    /// Tags.
    #[serde(default)]
    #[validate(custom(function = "unique_tags"))]
    pub tags: Vec<String>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            tags: req.tags,
        }
    }
}

/// Partial post update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    /// New title.
    #[validate(length(min = 1, max = 500, message = "must be provided and at most 500 bytes long"))]
    pub title: Option<String>,
    /// New body.
    #[validate(length(min = 1, message = "must be provided"))]
    pub body: Option<String>,
    /// Replacement tags.
    #[validate(custom(function = "unique_tags"))]
    pub tags: Option<Vec<String>>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            tags: req.tags,
        }
    }
}

fn unique_tags(tags: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if tags.iter().all(|t| seen.insert(t)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("unique");
        err.message = Some("must not contain duplicate values".into());
        Err(err)
    }
}
