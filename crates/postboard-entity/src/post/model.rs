//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::version::Versioned;

/// A published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier.
    pub id: i64,
    /// When the post was created.
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Optimistic concurrency counter.
    pub version: i32,
}

impl Post {
    /// Apply a partial update in place. Identity and version are untouched.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

impl Versioned for Post {
    fn id(&self) -> i64 {
        self.id
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }
}

/// Data required to create a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Tags.
    pub tags: Vec<String>,
}

/// Fields a partial update may change.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
}
