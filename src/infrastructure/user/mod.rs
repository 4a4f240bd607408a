//! User infrastructure module
//!
//! Argon2 password hashing, the storage-backed user repository and the user
//! service that orchestrates registration, profile updates and listing.

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StorageUserRepository;
pub use service::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserService};

pub(crate) use service::store_failure;

#[cfg(test)]
pub use password::MockPasswordHasher;
