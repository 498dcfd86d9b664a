//! PostgreSQL implementations of the store traits.

pub mod permission;
pub mod post;
pub mod token;
pub mod user;

pub use permission::PermissionRepository;
pub use post::PostRepository;
pub use token::TokenRepository;
pub use user::UserRepository;
