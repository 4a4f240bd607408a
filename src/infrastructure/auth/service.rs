//! Login with brute-force lockout

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::login_attempt::{LockoutPolicy, LockoutStatus, LoginAttemptRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::{store_failure, PasswordHasher};

use super::jwt::JwtGenerator;

/// Successful login: the account and a session token
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub user: User,
    pub token: String,
}

/// Checks credentials, tracking failures per email and refusing locked emails
#[derive(Debug)]
pub struct AuthenticationService<R, A, H>
where
    R: UserRepository,
    A: LoginAttemptRepository,
    H: PasswordHasher,
{
    users: Arc<R>,
    attempts: Arc<A>,
    hasher: Arc<H>,
    jwt: Arc<dyn JwtGenerator>,
    policy: LockoutPolicy,
}

impl<R, A, H> AuthenticationService<R, A, H>
where
    R: UserRepository,
    A: LoginAttemptRepository,
    H: PasswordHasher,
{
    pub fn new(
        users: Arc<R>,
        attempts: Arc<A>,
        hasher: Arc<H>,
        jwt: Arc<dyn JwtGenerator>,
        policy: LockoutPolicy,
    ) -> Self {
        Self {
            users,
            attempts,
            hasher,
            jwt,
            policy,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, DomainError> {
        let record = self.attempts.get(email).await?;

        match self.policy.evaluate(record.as_ref(), Utc::now()) {
            LockoutStatus::Clear => {}
            LockoutStatus::Locked { retry_after } => {
                warn!(
                    email = %email,
                    retry_after_secs = retry_after.num_seconds(),
                    "Login refused, too many failed attempts"
                );
                return Err(DomainError::forbidden(
                    "Too many failed login attempts. Please try again later.",
                ));
            }
            LockoutStatus::Expired => {
                info!(email = %email, "Lockout expired");
                self.attempts.clear(email).await?;
            }
        }

        let user = self
            .users
            .get_by_email(email)
            .await
            .map_err(store_failure("Failed to look up account"))?;

        let verified = user
            .as_ref()
            .is_some_and(|u| self.hasher.verify(password, u.password_hash()));

        let Some(user) = user.filter(|_| verified) else {
            let record = self.attempts.record_failure(email).await?;
            warn!(email = %email, failures = record.count, "Failed login");
            return Err(DomainError::invalid_credentials("Wrong email or password"));
        };

        self.attempts.clear(email).await?;

        let token = self.jwt.generate(&user)?;
        info!(id = %user.id(), "User logged in");

        Ok(LoginSuccess { user, token })
    }
}
