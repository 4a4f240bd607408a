//! User domain
//!
//! Domain types for registered users and the repository trait the user and
//! authentication services persist them through.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_user_id, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
