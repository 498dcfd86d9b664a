//! Per-client admission control.

pub mod limiter;
pub mod sweeper;

pub use limiter::RateLimiter;
