//! Capability code set.

use serde::{Deserialize, Serialize};

/// Read access to posts.
pub const POSTS_READ: &str = "posts:read";
/// Write access to posts.
pub const POSTS_WRITE: &str = "posts:write";

/// The capability codes a user holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(pub Vec<String>);

impl Permissions {
    /// Check whether `code` is held.
    pub fn include(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    /// Number of codes held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no codes are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Permissions {
    fn from(codes: Vec<String>) -> Self {
        Self(codes)
    }
}
