//! eCash account infrastructure

mod repository;
mod service;

pub use repository::StorageECashRepository;
pub use service::{CreateECashRequest, ECashService, UpdateECashRequest};
