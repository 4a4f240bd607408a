//! Authentication infrastructure module
//!
//! Session tokens, the failed-login store and the login flow that ties them
//! to the user repository.

mod jwt;
mod login_attempts;
mod service;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
pub use login_attempts::InMemoryLoginAttemptRepository;
pub use service::{AuthenticationService, LoginSuccess};
