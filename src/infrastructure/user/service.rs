//! User service for registration, profile management and listing

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::listing::{list_page, ListQuery, PagedResult};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Request for replacing a user's profile
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

/// Request for changing a user's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub password_new: String,
    pub password_confirm: String,
}

/// Log a store failure and collapse it into UNPROCESSABLE_ENTITY
pub(crate) fn store_failure(context: &'static str) -> impl FnOnce(DomainError) -> DomainError {
    move |err| {
        error!(error = %err, "{}", context);
        DomainError::unprocessable(context)
    }
}

fn unknown_user() -> DomainError {
    DomainError::unprocessable("Unknown user")
}

/// User service for account management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// One page of users after search and sort
    pub async fn list(&self, query: &ListQuery) -> Result<PagedResult<User>, DomainError> {
        debug!(
            page_number = query.page_number(),
            page_size = query.page_size(),
            "Listing users"
        );

        let users = self
            .repository
            .list()
            .await
            .map_err(store_failure("Failed to list users"))?;

        Ok(list_page(users, query))
    }

    /// Look up one user. A malformed id finds nothing; only store failures error.
    pub async fn find(&self, id: &str) -> Result<Option<User>, DomainError> {
        let Ok(user_id) = UserId::new(id) else {
            return Ok(None);
        };

        self.repository
            .get(&user_id)
            .await
            .map_err(store_failure("Failed to get user"))
    }

    /// Fetch one user, unknown or malformed ids are unprocessable
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        self.find(id).await?.ok_or_else(unknown_user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let existing = self
            .repository
            .get_by_email(email)
            .await
            .map_err(store_failure("Failed to look up email"))?;

        Ok(existing.is_some())
    }

    /// Register a user. Confirmation and uniqueness are checked before hashing.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        if request.password != request.password_confirm {
            return Err(DomainError::invalid_password("Password confirmation mismatched"));
        }

        if self.email_exists(&request.email).await? {
            return Err(DomainError::email_already_taken("Email already exists"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(&request.name, &request.email, password_hash);

        let user = self
            .repository
            .create(user)
            .await
            .map_err(store_failure("Failed to create user"))?;

        info!(id = %user.id(), email = %user.email(), "Created user");
        Ok(user)
    }

    /// Replace name and email. The email may not belong to another user.
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        let holder = self
            .repository
            .get_by_email(&request.email)
            .await
            .map_err(store_failure("Failed to look up email"))?;

        if holder.is_some_and(|other| other.id() != user.id()) {
            return Err(DomainError::email_already_taken("Email already exists"));
        }

        user.set_profile(&request.name, &request.email);

        let user = self
            .repository
            .update(user)
            .await
            .map_err(store_failure("Failed to update user"))?;

        info!(id = %user.id(), "Updated user");
        Ok(user)
    }

    /// Remove a user and return its id
    pub async fn delete(&self, id: &str) -> Result<UserId, DomainError> {
        let user = self.get(id).await?;

        let removed = self
            .repository
            .delete(user.id())
            .await
            .map_err(store_failure("Failed to delete user"))?;

        if !removed {
            return Err(DomainError::unprocessable("Failed to delete user"));
        }

        info!(id = %user.id(), "Deleted user");
        Ok(user.id().clone())
    }

    /// Verify the old password, then store a hash of the new one
    pub async fn change_password(
        &self,
        id: &str,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError> {
        if request.password_new != request.password_confirm {
            return Err(DomainError::invalid_password("Password confirmation mismatched"));
        }

        let mut user = self.get(id).await?;

        if !self.hasher.verify(&request.old_password, user.password_hash()) {
            return Err(DomainError::invalid_credentials("Wrong old password"));
        }

        let password_hash = self.hasher.hash(&request.password_new)?;
        user.set_password_hash(password_hash);

        let user = self
            .repository
            .update(user)
            .await
            .map_err(store_failure("Failed to change password"))?;

        info!(id = %user.id(), "Changed user password");
        Ok(user)
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::SortSpec;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::password::MockPasswordHasher;
    use crate::infrastructure::user::repository::StorageUserRepository;

    fn fake_hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|password| Ok(format!("hashed:{}", password)));
        hasher
            .expect_verify()
            .returning(|password, hash| hash == format!("hashed:{}", password));
        hasher
    }

    fn create_service() -> UserService<StorageUserRepository, MockPasswordHasher> {
        let repository = StorageUserRepository::new(Arc::new(InMemoryStorage::<User>::new()));
        UserService::new(Arc::new(repository), Arc::new(fake_hasher()))
    }

    fn register(name: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let service = create_service();

        let user = service
            .create(register("Alice", "alice@example.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(user.name(), "Alice");
        assert_eq!(user.password_hash(), "hashed:secret1");
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_confirmation_mismatch_writes_nothing() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().never();
        repo.expect_create().never();

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let service = UserService::new(Arc::new(repo), Arc::new(hasher));

        let mut request = register("Alice", "alice@example.com", "secret1");
        request.password_confirm = "secret2".to_string();

        let result = service.create(request).await;
        assert!(matches!(result, Err(DomainError::InvalidPassword { .. })));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_skips_hash_and_write() {
        let existing = User::new("Alice", "alice@example.com", "hash");

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let service = UserService::new(Arc::new(repo), Arc::new(hasher));

        let result = service
            .create(register("Other", "alice@example.com", "secret1"))
            .await;
        assert!(matches!(result, Err(DomainError::EmailAlreadyTaken { .. })));
    }

    #[tokio::test]
    async fn test_create_store_failure_is_unprocessable() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(DomainError::storage("connection reset")));

        let service = UserService::new(Arc::new(repo), Arc::new(fake_hasher()));

        let result = service
            .create(register("Alice", "alice@example.com", "secret1"))
            .await;

        match result {
            Err(DomainError::UnprocessableEntity { message }) => {
                assert_eq!(message, "Failed to create user");
            }
            other => panic!("Expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_unknown_and_malformed_ids() {
        let service = create_service();

        let unknown = service.get("does-not-exist").await;
        assert!(matches!(unknown, Err(DomainError::UnprocessableEntity { .. })));

        let malformed = service.get("not a valid id").await;
        assert!(matches!(malformed, Err(DomainError::UnprocessableEntity { .. })));
    }

    #[tokio::test]
    async fn test_find_separates_missing_from_store_failure() {
        let service = create_service();
        assert!(service.find("does-not-exist").await.unwrap().is_none());
        assert!(service.find("not a valid id").await.unwrap().is_none());

        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .returning(|_| Err(DomainError::storage("connection refused")));
        let failing = UserService::new(Arc::new(repo), Arc::new(fake_hasher()));

        let result = failing.find("some-user").await;
        assert!(matches!(result, Err(DomainError::UnprocessableEntity { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_user_does_not_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = UserService::new(Arc::new(repo), Arc::new(fake_hasher()));

        let result = service
            .update(
                "missing",
                UpdateUserRequest {
                    name: "X".to_string(),
                    email: "x@example.com".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::UnprocessableEntity { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let service = create_service();
        let user = service
            .create(register("Alice", "alice@example.com", "secret1"))
            .await
            .unwrap();

        let updated = service
            .update(
                user.id().as_str(),
                UpdateUserRequest {
                    name: "Alicia".to_string(),
                    email: "alice@example.com".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "Alicia");
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_another_user() {
        let service = create_service();
        service
            .create(register("Alice", "alice@example.com", "secret1"))
            .await
            .unwrap();
        let bob = service
            .create(register("Bob", "bob@example.com", "secret1"))
            .await
            .unwrap();

        let result = service
            .update(
                bob.id().as_str(),
                UpdateUserRequest {
                    name: "Bob".to_string(),
                    email: "alice@example.com".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::EmailAlreadyTaken { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_user_does_not_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = UserService::new(Arc::new(repo), Arc::new(fake_hasher()));

        let result = service.delete("missing").await;
        assert!(matches!(result, Err(DomainError::UnprocessableEntity { .. })));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = create_service();
        let user = service
            .create(register("Alice", "alice@example.com", "secret1"))
            .await
            .unwrap();

        let removed = service.delete(user.id().as_str()).await.unwrap();
        assert_eq!(&removed, user.id());
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_change_password_flow() {
        let service = create_service();
        let user = service
            .create(register("Alice", "alice@example.com", "secret1"))
            .await
            .unwrap();
        let id = user.id().as_str().to_string();

        let mismatch = service
            .change_password(
                &id,
                ChangePasswordRequest {
                    old_password: "secret1".to_string(),
                    password_new: "secret2".to_string(),
                    password_confirm: "secret3".to_string(),
                },
            )
            .await;
        assert!(matches!(mismatch, Err(DomainError::InvalidPassword { .. })));

        let wrong_old = service
            .change_password(
                &id,
                ChangePasswordRequest {
                    old_password: "nope".to_string(),
                    password_new: "secret2".to_string(),
                    password_confirm: "secret2".to_string(),
                },
            )
            .await;
        assert!(matches!(wrong_old, Err(DomainError::InvalidCredentials { .. })));

        let changed = service
            .change_password(
                &id,
                ChangePasswordRequest {
                    old_password: "secret1".to_string(),
                    password_new: "secret2".to_string(),
                    password_confirm: "secret2".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(changed.password_hash(), "hashed:secret2");
    }

    #[tokio::test]
    async fn test_list_runs_pipeline() {
        let service = create_service();
        for email in ["b@x", "a@x", "a1@x"] {
            service
                .create(register("User", email, "secret1"))
                .await
                .unwrap();
        }

        let query = ListQuery::new(1, 10)
            .unwrap()
            .with_sort(SortSpec::parse("email:asc"));
        let page = service.list(&query).await.unwrap();

        let emails: Vec<&str> = page.data.iter().map(|u| u.email()).collect();
        assert_eq!(emails, vec!["a@x", "a1@x", "b@x"]);
    }

    #[tokio::test]
    async fn test_list_store_failure_is_unprocessable() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(DomainError::storage("down")));

        let service = UserService::new(Arc::new(repo), Arc::new(fake_hasher()));

        let result = service.list(&ListQuery::new(1, 10).unwrap()).await;
        assert!(matches!(result, Err(DomainError::UnprocessableEntity { .. })));
    }
}
