//! Capability lookups.

pub mod index;

pub use index::PermissionIndex;
