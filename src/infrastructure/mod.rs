//! Infrastructure layer - Storage, hashing, tokens and services

pub mod auth;
pub mod ecash;
pub mod logging;
pub mod storage;
pub mod user;
