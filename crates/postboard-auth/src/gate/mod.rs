//! Request gates: who is calling, and may they proceed.

pub mod authentication;
pub mod authorization;

pub use authentication::AuthenticationGate;
pub use authorization::AuthorizationGate;
