//! Budget repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::budgets_model::{Budget, NewBudget};
use crate::errors::Result;

/// Trait defining the contract for Budget repository operations.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Creates a new budget bucket.
    async fn create(&self, budget: Budget) -> Result<Budget>;

    /// Overwrites an existing budget.
    async fn update(&self, budget: Budget) -> Result<Budget>;

    /// Deletes a budget by its ID. Returns the number of deleted records.
    async fn delete(&self, budget_id: &str, user_id: &str) -> Result<usize>;

    /// Retrieves a budget owned by the given user.
    fn get_by_id(&self, budget_id: &str, user_id: &str) -> Result<Budget>;

    /// Looks up the unique bucket for (user, category, month, year).
    fn find_by_bucket(
        &self,
        user_id: &str,
        category_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<Budget>>;

    /// Lists a user's budgets for one month/year period.
    fn list(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Budget>>;

    /// Persists a spend-accumulator mutation.
    ///
    /// Called inside the same atomic-commit closure as the transaction that
    /// produced the spend; must not start its own storage transaction.
    fn save_spent(&self, budget: &Budget) -> Result<()>;
}

/// Trait defining the contract for Budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Creates a budget; rejects a duplicate (user, category, month, year)
    /// bucket.
    async fn create_budget(&self, new_budget: NewBudget, user_id: &str) -> Result<Budget>;

    /// Overwrites the spend limit only. The status is deliberately not
    /// recomputed against the unchanged `spent`.
    async fn update_budget(
        &self,
        budget_id: &str,
        amount: Decimal,
        user_id: &str,
    ) -> Result<Budget>;

    /// Deletes a budget.
    async fn delete_budget(&self, budget_id: &str, user_id: &str) -> Result<()>;

    /// Retrieves a budget scoped to its owner.
    fn get_budget(&self, budget_id: &str, user_id: &str) -> Result<Budget>;

    /// Lists a user's budgets for one month/year period.
    fn list_budgets(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Budget>>;

    /// Adds a completed expense to the matching bucket's accumulator and
    /// recomputes its threshold status. A missing bucket is a silent no-op.
    ///
    /// Called by the transaction engine inside its atomic-commit closure.
    fn record_expense(
        &self,
        user_id: &str,
        category_id: &str,
        month: u32,
        year: i32,
        amount: Decimal,
    ) -> Result<()>;
}
