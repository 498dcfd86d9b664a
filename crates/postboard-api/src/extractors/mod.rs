//! Custom Axum extractors.

pub mod json;
pub mod list;
pub mod path;
pub mod principal;
pub mod version;

pub use json::ValidatedJson;
pub use list::PostListQuery;
pub use path::parse_id;
pub use principal::{Capability, CurrentPrincipal, Permitted, PostsRead, PostsWrite};
pub use version::ExpectedVersion;
