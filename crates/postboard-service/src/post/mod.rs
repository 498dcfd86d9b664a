//! Posts: CRUD around the versioned write path.

pub mod service;

pub use service::PostService;
