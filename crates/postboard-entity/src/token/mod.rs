//! Opaque access token entities.

pub mod model;
pub mod scope;

pub use model::AccessToken;
pub use scope::TokenScope;
