//! # postboard-database
//!
//! Store traits consumed by the service layer, their PostgreSQL
//! implementations, and an in-memory implementation with identical
//! concurrency semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod query;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{PermissionStore, PostStore, Stores, TokenStore, UserStore};
