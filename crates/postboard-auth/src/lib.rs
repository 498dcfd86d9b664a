//! # postboard-auth
//!
//! Access control for Postboard.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `token`: opaque token generation and the `CredentialStore`
//! - `permission`: capability lookups via `PermissionIndex`
//! - `gate`: bearer-token authentication and authorization checks
//! - `ratelimit`: per-client token buckets with a stale-client sweeper

pub mod gate;
pub mod password;
pub mod permission;
pub mod ratelimit;
pub mod token;

pub use gate::{AuthenticationGate, AuthorizationGate};
pub use password::PasswordHasher;
pub use permission::PermissionIndex;
pub use ratelimit::RateLimiter;
pub use token::CredentialStore;
