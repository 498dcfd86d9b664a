//! Post domain entities.

pub mod filter;
pub mod model;

pub use filter::{PageMetadata, PostFilter, PostPage, PostSort};
pub use model::{NewPost, Post, PostPatch};
