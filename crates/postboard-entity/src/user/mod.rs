//! User domain entities.

pub mod model;
pub mod principal;

pub use model::{NewUser, User};
pub use principal::Principal;
