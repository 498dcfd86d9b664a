//! User lifecycle: registration, activation and login.

pub mod service;

pub use service::{Registration, UserService};
