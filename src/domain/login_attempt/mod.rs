//! Failed-login tracking and lockout policy

mod policy;
mod repository;

pub use policy::{FailedLogin, LockoutPolicy, LockoutStatus};
pub use repository::LoginAttemptRepository;

#[cfg(test)]
pub use repository::MockLoginAttemptRepository;
