//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
///
/// Mutating methods are called inside an atomic-commit closure
/// ([`crate::db::TransactionExecutor`]) together with the account and budget
/// rows the transaction touches; they must not start their own storage
/// transaction.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Retrieves a transaction owned by the given user.
    fn get_by_id(&self, transaction_id: &str, user_id: &str) -> Result<Transaction>;

    /// Lists all transactions owned by the given user.
    fn list(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Inserts a new transaction record.
    fn insert(&self, transaction: Transaction) -> Result<Transaction>;

    /// Overwrites an existing transaction record.
    fn save(&self, transaction: &Transaction) -> Result<()>;

    /// Removes a transaction record. Returns the number of deleted records.
    fn remove(&self, transaction_id: &str, user_id: &str) -> Result<usize>;
}

/// Trait defining the contract for the transaction engine.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Validates and creates a transaction, applying its ledger effect and,
    /// for a completed categorized expense, recording the budget spend.
    /// The whole protocol commits in one atomic unit.
    async fn create_transaction(
        &self,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction>;

    /// Runs the full creation protocol without opening its own atomic
    /// commit, enlisting every write in the caller's storage transaction.
    ///
    /// Must be called inside an existing [`crate::db::TransactionExecutor`]
    /// closure; `create_transaction` is the self-guarded variant.
    fn create_transaction_in_tx(
        &self,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction>;

    /// Reverses the stored state's ledger effect, overwrites every mutable
    /// field from the request, and re-applies the new effect.
    async fn update_transaction(
        &self,
        transaction_id: &str,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction>;

    /// Reverses the stored state's ledger effect and deletes the record.
    async fn delete_transaction(&self, transaction_id: &str, user_id: &str) -> Result<()>;

    /// Retrieves a transaction scoped to its owner.
    fn get_transaction(&self, transaction_id: &str, user_id: &str) -> Result<Transaction>;

    /// Lists all transactions owned by the user.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
}
