use thiserror::Error;

/// Core domain errors
///
/// The first group is what the orchestration layer reports to callers. The
/// storage group is produced by storage backends and is collapsed into
/// `UnprocessableEntity` before it leaves a service.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    #[error("Invalid password: {message}")]
    InvalidPassword { message: String },

    #[error("Email already taken: {message}")]
    EmailAlreadyTaken { message: String },

    #[error("Unprocessable entity: {message}")]
    UnprocessableEntity { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn invalid_password(message: impl Into<String>) -> Self {
        Self::InvalidPassword {
            message: message.into(),
        }
    }

    pub fn email_already_taken(message: impl Into<String>) -> Self {
        Self::EmailAlreadyTaken {
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::UnprocessableEntity {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the caller-facing taxonomy
    pub fn is_caller_facing(&self) -> bool {
        matches!(
            self,
            Self::Forbidden { .. }
                | Self::InvalidCredentials { .. }
                | Self::InvalidPassword { .. }
                | Self::EmailAlreadyTaken { .. }
                | Self::UnprocessableEntity { .. }
                | Self::Validation { .. }
                | Self::Unauthorized { .. }
        )
    }
}
