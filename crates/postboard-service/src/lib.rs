//! # postboard-service
//!
//! Business logic service layer for Postboard. Services orchestrate the
//! stores, the credential store and the task supervisor to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod post;
pub mod user;

pub use post::PostService;
pub use user::UserService;
