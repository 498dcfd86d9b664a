//! Opaque token generation and lookup.

pub mod generator;
pub mod store;

pub use generator::{generate, hash_plaintext};
pub use store::CredentialStore;
