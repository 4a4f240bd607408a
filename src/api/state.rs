//! Application state for shared services

use std::sync::Arc;

use crate::config::ListingConfig;
use crate::domain::ecash::ECashRepository;
use crate::domain::listing::{ListQuery, PagedResult};
use crate::domain::login_attempt::LoginAttemptRepository;
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, ECashAccount, ECashId, User, UserId};
use crate::infrastructure::auth::{AuthenticationService, JwtGenerator, LoginSuccess};
use crate::infrastructure::ecash::{CreateECashRequest, ECashService, UpdateECashRequest};
use crate::infrastructure::user::{
    ChangePasswordRequest, CreateUserRequest, PasswordHasher, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub ecash_service: Arc<dyn ECashServiceTrait>,
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub listing: ListingConfig,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<PagedResult<User>, DomainError>;
    async fn find(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn get(&self, id: &str) -> Result<User, DomainError>;
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, id: &str) -> Result<UserId, DomainError>;
    async fn change_password(
        &self,
        id: &str,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for eCash account service operations
#[async_trait::async_trait]
pub trait ECashServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<ECashAccount>, DomainError>;
    async fn get(&self, id: &str) -> Result<ECashAccount, DomainError>;
    async fn create(&self, request: CreateECashRequest) -> Result<ECashAccount, DomainError>;
    async fn update(
        &self,
        id: &str,
        request: UpdateECashRequest,
    ) -> Result<ECashAccount, DomainError>;
    async fn delete(&self, id: &str) -> Result<ECashId, DomainError>;
}

/// Trait for the login flow
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn list(&self, query: &ListQuery) -> Result<PagedResult<User>, DomainError> {
        UserService::list(self, query).await
    }

    async fn find(&self, id: &str) -> Result<Option<User>, DomainError> {
        UserService::find(self, id).await
    }

    async fn get(&self, id: &str) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<UserId, DomainError> {
        UserService::delete(self, id).await
    }

    async fn change_password(
        &self,
        id: &str,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError> {
        UserService::change_password(self, id, request).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: ECashRepository + 'static> ECashServiceTrait for ECashService<R> {
    async fn list(&self) -> Result<Vec<ECashAccount>, DomainError> {
        ECashService::list(self).await
    }

    async fn get(&self, id: &str) -> Result<ECashAccount, DomainError> {
        ECashService::get(self, id).await
    }

    async fn create(&self, request: CreateECashRequest) -> Result<ECashAccount, DomainError> {
        ECashService::create(self, request).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateECashRequest,
    ) -> Result<ECashAccount, DomainError> {
        ECashService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<ECashId, DomainError> {
        ECashService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl<R, A, H> AuthServiceTrait for AuthenticationService<R, A, H>
where
    R: UserRepository + 'static,
    A: LoginAttemptRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, DomainError> {
        AuthenticationService::login(self, email, password).await
    }
}
