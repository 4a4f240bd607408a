//! User management endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::{get, patch},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::config::ListingConfig;
use crate::domain::listing::{ListQuery, PagedResult, SearchSpec, SortSpec};
use crate::domain::User;
use crate::infrastructure::user::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/change-password", patch(change_password))
}

/// Query string of `GET /api/users`; omitted values fall back to `ListingConfig`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1))]
    pub page_number: Option<usize>,
    #[validate(range(min = 1, max = 1000))]
    pub page_size: Option<usize>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

impl ListUsersQuery {
    fn into_list_query(self, defaults: &ListingConfig) -> Result<ListQuery, ApiError> {
        let query = ListQuery::new(
            self.page_number.unwrap_or(1),
            self.page_size.unwrap_or(defaults.default_page_size),
        )?;

        let sort = self.sort.as_deref().unwrap_or(&defaults.default_sort);
        let query = query.with_sort(SortSpec::parse(sort));

        Ok(match self.search.as_deref().and_then(SearchSpec::parse) {
            Some(search) => query.with_search(search),
            None => query,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserApiRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 32))]
    pub password: String,
    #[validate(length(min = 6, max = 32))]
    pub password_confirm: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserApiRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordApiRequest {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 6, max = 32))]
    pub password_new: String,
    #[validate(length(min = 6, max = 32))]
    pub password_confirm: String,
}

/// Public view of a user; the password hash never leaves the service
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub id: String,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<PagedResult<UserResponse>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    query.validate()?;

    let list_query = query.into_list_query(&state.listing)?;
    debug!(
        page_number = list_query.page_number(),
        page_size = list_query.page_size(),
        "Listing users"
    );

    let page = state.user_service.list(&list_query).await?;

    Ok(Json(page.map(UserResponse::from)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<Json<CreatedUserResponse>, ApiError> {
    request.validate()?;

    let user = state
        .user_service
        .create(CreateUserRequest {
            name: request.name,
            email: request.email,
            password: request.password,
            password_confirm: request.password_confirm,
        })
        .await?;

    Ok(Json(CreatedUserResponse {
        name: user.name().to_string(),
        email: user.email().to_string(),
    }))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get(&id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserIdResponse>, ApiError> {
    request.validate()?;

    let user = state
        .user_service
        .update(
            &id,
            UpdateUserRequest {
                name: request.name,
                email: request.email,
            },
        )
        .await?;

    Ok(Json(UserIdResponse {
        id: user.id().as_str().to_string(),
    }))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<UserIdResponse>, ApiError> {
    let deleted = state.user_service.delete(&id).await?;

    Ok(Json(UserIdResponse {
        id: deleted.as_str().to_string(),
    }))
}

/// PATCH /api/users/{id}/change-password
pub async fn change_password(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<ChangePasswordApiRequest>,
) -> Result<Json<UserIdResponse>, ApiError> {
    request.validate()?;

    let user = state
        .user_service
        .change_password(
            &id,
            ChangePasswordRequest {
                old_password: request.old_password,
                password_new: request.password_new,
                password_confirm: request.password_confirm,
            },
        )
        .await?;

    Ok(Json(UserIdResponse {
        id: user.id().as_str().to_string(),
    }))
}
