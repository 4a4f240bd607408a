//! API error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    PermissionError,
    NotFoundError,
    ConflictError,
    UnprocessableEntityError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::PermissionError => write!(f, "permission_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::UnprocessableEntityError => write!(f, "unprocessable_entity_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// `{"error": {...}}` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        error_type: ApiErrorType,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                    code: Some(code.to_string()),
                },
            },
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            "VALIDATION_ERROR",
            message,
        )
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiErrorType::AuthenticationError,
            "UNAUTHORIZED",
            message,
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            ApiErrorType::PermissionError,
            "FORBIDDEN",
            message,
        )
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            ApiErrorType::AuthenticationError,
            "INVALID_CREDENTIALS_ERROR",
            message,
        )
    }

    pub fn invalid_password(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            ApiErrorType::InvalidRequestError,
            "INVALID_PASSWORD_ERROR",
            message,
        )
    }

    pub fn email_already_taken(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            ApiErrorType::ConflictError,
            "EMAIL_ALREADY_TAKEN_ERROR",
            message,
        )
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::UnprocessableEntityError,
            "UNPROCESSABLE_ENTITY_ERROR",
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ApiErrorType::NotFoundError,
            "NOT_FOUND",
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            "SERVER_ERROR",
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Forbidden { message } => Self::forbidden(message),
            DomainError::InvalidCredentials { message } => Self::invalid_credentials(message),
            DomainError::InvalidPassword { message } => Self::invalid_password(message),
            DomainError::EmailAlreadyTaken { message } => Self::email_already_taken(message),
            DomainError::UnprocessableEntity { message } => Self::unprocessable(message),
            DomainError::Validation { message } => Self::validation(message),
            DomainError::Unauthorized { message } => Self::unauthorized(message),
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Conflict { message } => Self::unprocessable(message),
            DomainError::Storage { .. } | DomainError::Internal { .. } => {
                tracing::error!(error = %err, "Internal error reached the API boundary");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();

        let message = fields
            .iter()
            .map(|field| format!("{} is invalid", field))
            .collect::<Vec<_>>()
            .join(", ");

        let err = Self::validation(message);
        match fields.into_iter().next() {
            Some(field) => err.with_param(field),
            None => err,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::forbidden("x"), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (
                DomainError::invalid_credentials("x"),
                StatusCode::FORBIDDEN,
                "INVALID_CREDENTIALS_ERROR",
            ),
            (
                DomainError::invalid_password("x"),
                StatusCode::FORBIDDEN,
                "INVALID_PASSWORD_ERROR",
            ),
            (
                DomainError::email_already_taken("x"),
                StatusCode::CONFLICT,
                "EMAIL_ALREADY_TAKEN_ERROR",
            ),
            (
                DomainError::unprocessable("x"),
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY_ERROR",
            ),
            (DomainError::validation("x"), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (DomainError::unauthorized("x"), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (
                DomainError::storage("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERVER_ERROR",
            ),
        ];

        for (domain_err, status, code) in cases {
            let api_err = ApiError::from(domain_err);
            assert_eq!(api_err.status, status);
            assert_eq!(api_err.response.error.code.as_deref(), Some(code));
        }
    }

    #[test]
    fn test_internal_errors_hide_cause() {
        let api_err = ApiError::from(DomainError::storage("password=hunter2 in DSN"));

        assert_eq!(api_err.response.error.message, "Internal server error");
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unprocessable("Unknown user");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["message"], "Unknown user");
        assert_eq!(json["error"]["type"], "unprocessable_entity_error");
        assert_eq!(json["error"]["code"], "UNPROCESSABLE_ENTITY_ERROR");
        assert!(json["error"].get("param").is_none());
    }

    #[derive(Validate)]
    struct SignupForm {
        #[validate(email)]
        email: String,
        #[validate(length(min = 6))]
        password: String,
    }

    #[test]
    fn test_validation_errors_name_fields() {
        let form = SignupForm {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };

        let api_err = ApiError::from(form.validate().unwrap_err());
        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api_err.response.error.message,
            "email is invalid, password is invalid"
        );
        assert_eq!(api_err.response.error.param.as_deref(), Some("email"));
    }
}
