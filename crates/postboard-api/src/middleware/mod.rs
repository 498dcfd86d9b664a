//! Axum middleware stack.

pub mod authenticate;
pub mod cors;
pub mod logging;
pub mod panic;
pub mod rate_limit;
