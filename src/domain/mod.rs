//! Domain layer - Core business logic and entities

pub mod ecash;
pub mod error;
pub mod listing;
pub mod login_attempt;
pub mod storage;
pub mod user;

pub use ecash::{ECashAccount, ECashId, ECashRepository};
pub use error::DomainError;
pub use listing::{list_page, ListQuery, Listable, PagedResult, SearchSpec, SortOrder, SortSpec};
pub use login_attempt::{FailedLogin, LockoutPolicy, LockoutStatus, LoginAttemptRepository};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use user::{User, UserId, UserRepository};
