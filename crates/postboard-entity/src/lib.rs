//! # postboard-entity
//!
//! Domain entity models for Postboard. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod permission;
pub mod post;
pub mod token;
pub mod user;
pub mod version;

pub use permission::Permissions;
pub use post::Post;
pub use token::{AccessToken, TokenScope};
pub use user::{Principal, User};
pub use version::Versioned;
