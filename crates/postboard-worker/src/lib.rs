//! Background work for Postboard.
//!
//! This crate provides:
//! - A task supervisor that tracks fire-and-forget work and drains it on shutdown
//! - The notification sink used by request handlers for side effects

pub mod notifier;
pub mod supervisor;

pub use notifier::{LogNotifier, Notifier};
pub use supervisor::TaskSupervisor;
