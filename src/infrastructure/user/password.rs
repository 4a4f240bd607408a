//! Argon2id password hashing

use std::fmt;

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use tracing::warn;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Hashes stored passwords and checks login attempts against them
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync + fmt::Debug {
    /// PHC string for a new password, salted per call
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// False on mismatch and on an unreadable stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id with configurable cost. Verification reads the cost from the
/// stored hash, so accounts hashed under older settings keep working.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2id v19 with explicit memory (KiB), iteration and lane counts
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, DomainError> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|e| {
            DomainError::validation(format!("Invalid Argon2 parameters: {}", e))
        })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.argon2.params();
        f.debug_struct("Argon2Hasher")
            .field("memory_kib", &params.m_cost())
            .field("iterations", &params.t_cost())
            .field("parallelism", &params.p_cost())
            .finish()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        let phc = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))?;

        Ok(phc.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(stored) => self
                .argon2
                .verify_password(password.as_bytes(), &stored)
                .is_ok(),
            Err(e) => {
                warn!(error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }
}
