//! eCash account domain

mod entity;
mod repository;

pub use entity::{ECashAccount, ECashId};
pub use repository::ECashRepository;

#[cfg(test)]
pub use repository::MockECashRepository;
