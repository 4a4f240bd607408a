//! eCash account service

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ecash::{ECashAccount, ECashId, ECashRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::store_failure;

/// Request for opening an eCash account
#[derive(Debug, Clone)]
pub struct CreateECashRequest {
    pub name: String,
    pub phone_number: String,
    pub pin: String,
    pub account_type: String,
    /// Opening deposit. Validated at the boundary, not stored.
    pub deposit: f64,
}

/// Request for replacing an account's contact fields
#[derive(Debug, Clone)]
pub struct UpdateECashRequest {
    pub phone_number: String,
    pub pin: String,
}

fn unknown_ecash() -> DomainError {
    DomainError::unprocessable("Unknown eCash")
}

#[derive(Debug)]
pub struct ECashService<R: ECashRepository> {
    repository: Arc<R>,
}

impl<R: ECashRepository> ECashService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<ECashAccount>, DomainError> {
        self.repository
            .list()
            .await
            .map_err(store_failure("Failed to list eCash accounts"))
    }

    pub async fn get(&self, id: &str) -> Result<ECashAccount, DomainError> {
        let account_id = ECashId::new(id).map_err(|_| unknown_ecash())?;

        self.repository
            .get(&account_id)
            .await
            .map_err(store_failure("Failed to get eCash account"))?
            .ok_or_else(unknown_ecash)
    }

    pub async fn create(&self, request: CreateECashRequest) -> Result<ECashAccount, DomainError> {
        debug!(deposit = request.deposit, "Opening deposit is not persisted");

        let account = ECashAccount::new(
            request.name,
            request.phone_number,
            request.pin,
            request.account_type,
        );

        let account = self
            .repository
            .create(account)
            .await
            .map_err(store_failure("Failed to create Account eCash"))?;

        info!(id = %account.id(), account_type = %account.account_type(), "Created eCash account");
        Ok(account)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateECashRequest,
    ) -> Result<ECashAccount, DomainError> {
        let mut account = self
            .get(id)
            .await
            .map_err(|_| DomainError::unprocessable("Failed to update account information"))?;

        account.set_contact(request.phone_number, request.pin);

        let account = self
            .repository
            .update(account)
            .await
            .map_err(store_failure("Failed to update account information"))?;

        info!(id = %account.id(), "Updated eCash account");
        Ok(account)
    }

    pub async fn delete(&self, id: &str) -> Result<ECashId, DomainError> {
        let account = self
            .get(id)
            .await
            .map_err(|_| DomainError::unprocessable("Failed to delete eCash"))?;

        let removed = self
            .repository
            .delete(account.id())
            .await
            .map_err(store_failure("Failed to delete eCash"))?;

        if !removed {
            return Err(DomainError::unprocessable("Failed to delete eCash"));
        }

        info!(id = %account.id(), "Deleted eCash account");
        Ok(account.id().clone())
    }
}
