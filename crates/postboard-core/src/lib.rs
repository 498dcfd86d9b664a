//! # postboard-core
//!
//! Core crate for Postboard. Contains configuration schemas, the unified
//! error taxonomy, and the shared result alias.
//!
//! This crate has **no** internal dependencies on other Postboard crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
