//! Authentication API endpoints

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub email: String,
    pub name: String,
    pub user_id: String,
    pub token: String,
}

/// POST /api/authentication/login
///
/// Emails with too many recent failures are refused with 403 before the
/// password is checked.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;
    debug!(email = %request.email, "Login attempt");

    let success = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        email: success.user.email().to_string(),
        name: success.user.name().to_string(),
        user_id: success.user.id().as_str().to_string(),
        token: success.token,
    }))
}
