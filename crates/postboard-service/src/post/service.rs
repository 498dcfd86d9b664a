//! Post operations.

use std::sync::Arc;

use tracing::info;

use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_database::store::PostStore;
use postboard_entity::post::{NewPost, PageMetadata, Post, PostFilter, PostPage, PostPatch};

/// Handles post reads and writes.
///
/// Updates read the current record, check the caller's optional expected
/// version, then issue the store's conditional write. The precondition only
/// fails fast; the conditional write is what rejects racing editors.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl std::fmt::Debug for PostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostService").finish()
    }
}

impl PostService {
    /// Creates a new post service.
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    /// Insert a post. The stored record starts at version 1.
    pub async fn create(&self, input: NewPost) -> AppResult<Post> {
        let post = self.posts.insert(input).await?;
        info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Fetch a post or fail with `NotFound`.
    pub async fn get(&self, id: i64) -> AppResult<Post> {
        self.posts.get(id).await?.ok_or_else(AppError::not_found)
    }

    /// One page of posts with pagination metadata.
    pub async fn list(&self, filter: &PostFilter) -> AppResult<PostPage> {
        let (posts, total) = self.posts.list(filter).await?;
        Ok(PostPage {
            posts,
            metadata: PageMetadata::calculate(total, filter.page, filter.page_size),
        })
    }

    /// Apply `patch` to post `id`.
    ///
    /// `expected_version`, when present, must equal the stored version or the
    /// call fails with `EditConflict` before writing.
    pub async fn update(
        &self,
        id: i64,
        expected_version: Option<i32>,
        patch: PostPatch,
    ) -> AppResult<Post> {
        let mut post = self.get(id).await?;

        if let Some(expected) = expected_version {
            if expected != post.version {
                return Err(AppError::edit_conflict());
            }
        }

        post.apply(patch);
        self.posts.update(&mut post).await?;

        info!(post_id = post.id, version = post.version, "Post updated");
        Ok(post)
    }

    /// Delete post `id` regardless of version.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.posts.delete(id).await? {
            return Err(AppError::not_found());
        }
        info!(post_id = id, "Post deleted");
        Ok(())
    }
}
