//! eCash account endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::ECashAccount;
use crate::infrastructure::ecash::{CreateECashRequest, UpdateECashRequest};

pub fn create_ecash_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateECashApiRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub pin: String,
    #[validate(length(min = 1))]
    pub account_type: String,
    #[serde(rename = "Deposit")]
    pub deposit: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateECashApiRequest {
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub pin: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ECashSummary {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub pin: String,
    pub account_type: String,
}

impl From<&ECashAccount> for ECashSummary {
    fn from(account: &ECashAccount) -> Self {
        Self {
            id: account.id().as_str().to_string(),
            name: account.name().to_string(),
            phone_number: account.phone_number().to_string(),
            pin: account.pin().to_string(),
            account_type: account.account_type().to_string(),
        }
    }
}

/// Single-account view, without the account type
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ECashDetail {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub pin: String,
}

impl From<&ECashAccount> for ECashDetail {
    fn from(account: &ECashAccount) -> Self {
        Self {
            id: account.id().as_str().to_string(),
            name: account.name().to_string(),
            phone_number: account.phone_number().to_string(),
            pin: account.pin().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ECashIdResponse {
    pub id: String,
}

/// GET /api/eCash
pub async fn list_accounts(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<Vec<ECashSummary>>, ApiError> {
    let accounts = state.ecash_service.list().await?;

    Ok(Json(accounts.iter().map(ECashSummary::from).collect()))
}

/// POST /api/eCash
pub async fn create_account(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Json(request): Json<CreateECashApiRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;
    debug!(name = %request.name, "Opening eCash account");

    state
        .ecash_service
        .create(CreateECashRequest {
            name: request.name,
            phone_number: request.phone_number,
            pin: request.pin,
            account_type: request.account_type,
            deposit: request.deposit,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Bank account created successfully".to_string(),
    }))
}

/// GET /api/eCash/{id}
pub async fn get_account(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<ECashDetail>, ApiError> {
    let account = state.ecash_service.get(&id).await?;

    Ok(Json(ECashDetail::from(&account)))
}

/// PUT /api/eCash/{id}
pub async fn update_account(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateECashApiRequest>,
) -> Result<Json<ECashIdResponse>, ApiError> {
    request.validate()?;

    let account = state
        .ecash_service
        .update(
            &id,
            UpdateECashRequest {
                phone_number: request.phone_number,
                pin: request.pin,
            },
        )
        .await?;

    Ok(Json(ECashIdResponse {
        id: account.id().as_str().to_string(),
    }))
}

/// DELETE /api/eCash/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<ECashIdResponse>, ApiError> {
    let deleted = state.ecash_service.delete(&id).await?;

    Ok(Json(ECashIdResponse {
        id: deleted.as_str().to_string(),
    }))
}
