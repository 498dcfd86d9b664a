//! Capability codes granted to users.

pub mod model;

pub use model::{POSTS_READ, POSTS_WRITE, Permissions};
