use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::time::Clock;

/// Service for managing accounts.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Creates a new AccountService instance.
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount, user_id: &str) -> Result<Account> {
        if new_account.currency.trim().is_empty() {
            return Err(ValidationError::MissingField("currency".to_string()).into());
        }
        debug!(
            "Creating account '{}' for user {}",
            new_account.name, user_id
        );

        let now = self.clock.now();
        let account = Account {
            id: new_account
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            name: new_account.name,
            account_type: new_account.account_type,
            currency: new_account.currency,
            balance: new_account.balance.unwrap_or(Decimal::ZERO),
            created_at: now,
            updated_at: now,
        };

        self.repository.create(account).await
    }

    async fn update_account(
        &self,
        account_update: AccountUpdate,
        user_id: &str,
    ) -> Result<Account> {
        // Re-read the stored row so the balance always comes from the ledger.
        let mut account = self.repository.get_by_id(&account_update.id, user_id)?;
        account.name = account_update.name;
        account.account_type = account_update.account_type;
        account.currency = account_update.currency;
        account.updated_at = self.clock.now();

        self.repository.update(account).await
    }

    async fn delete_account(&self, account_id: &str, user_id: &str) -> Result<()> {
        self.repository.delete(account_id, user_id).await?;
        Ok(())
    }

    fn get_account(&self, account_id: &str, user_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id, user_id)
    }

    fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list(user_id)
    }
}
