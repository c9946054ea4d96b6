//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// All lookups are scoped to the owning user: an id that exists but belongs
/// to another user must surface as not-found.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account.
    async fn create(&self, account: Account) -> Result<Account>;

    /// Updates an account's descriptive fields (never the balance).
    async fn update(&self, account: Account) -> Result<Account>;

    /// Deletes an account by its ID. Returns the number of deleted records.
    async fn delete(&self, account_id: &str, user_id: &str) -> Result<usize>;

    /// Retrieves an account owned by the given user.
    fn get_by_id(&self, account_id: &str, user_id: &str) -> Result<Account>;

    /// Lists all accounts owned by the given user.
    fn list(&self, user_id: &str) -> Result<Vec<Account>>;

    /// Persists a balance mutation performed by the ledger.
    ///
    /// Called inside an atomic-commit closure; must not start its own
    /// storage transaction.
    fn save_balance(&self, account: &Account) -> Result<()>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount, user_id: &str) -> Result<Account>;

    /// Updates an account's descriptive fields.
    async fn update_account(&self, account_update: AccountUpdate, user_id: &str)
        -> Result<Account>;

    /// Deletes an account. Existing transactions referencing it are left in
    /// place; no cascade policy is defined.
    async fn delete_account(&self, account_id: &str, user_id: &str) -> Result<()>;

    /// Retrieves an account scoped to its owner.
    fn get_account(&self, account_id: &str, user_id: &str) -> Result<Account>;

    /// Lists all accounts owned by the user.
    fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
}
