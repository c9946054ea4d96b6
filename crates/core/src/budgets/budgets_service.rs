use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::budgets_errors::BudgetError;
use super::budgets_model::{Budget, BudgetStatus, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryResolverTrait;
use crate::errors::{Result, ValidationError};
use crate::time::Clock;

/// Service maintaining per-(user, category, month, year) spend buckets.
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    category_resolver: Arc<dyn CategoryResolverTrait>,
    clock: Arc<dyn Clock>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        category_resolver: Arc<dyn CategoryResolverTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            category_resolver,
            clock,
        }
    }

    fn validate_month(month: u32) -> Result<()> {
        if !(1..=12).contains(&month) {
            return Err(
                ValidationError::InvalidInput(format!("month {} out of range 1-12", month)).into(),
            );
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budget(&self, new_budget: NewBudget, user_id: &str) -> Result<Budget> {
        Self::validate_month(new_budget.month)?;
        self.category_resolver
            .get_by_id(&new_budget.category_id, user_id)?;

        if self
            .repository
            .find_by_bucket(
                user_id,
                &new_budget.category_id,
                new_budget.month,
                new_budget.year,
            )?
            .is_some()
        {
            return Err(BudgetError::AlreadyExists.into());
        }

        let now = self.clock.now();
        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category_id: new_budget.category_id,
            amount: new_budget.amount,
            spent: Decimal::ZERO,
            month: new_budget.month,
            year: new_budget.year,
            status: BudgetStatus::Active,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(budget).await
    }

    async fn update_budget(
        &self,
        budget_id: &str,
        amount: Decimal,
        user_id: &str,
    ) -> Result<Budget> {
        let mut budget = self.repository.get_by_id(budget_id, user_id)?;
        // Only the limit moves here. The threshold status is recomputed
        // exclusively by record_expense, so an edit that drops the limit
        // below the accumulated spend leaves the stored status untouched.
        budget.amount = amount;
        budget.updated_at = self.clock.now();
        self.repository.update(budget).await
    }

    async fn delete_budget(&self, budget_id: &str, user_id: &str) -> Result<()> {
        self.repository.delete(budget_id, user_id).await?;
        Ok(())
    }

    fn get_budget(&self, budget_id: &str, user_id: &str) -> Result<Budget> {
        self.repository.get_by_id(budget_id, user_id)
    }

    fn list_budgets(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Budget>> {
        self.repository.list(user_id, month, year)
    }

    fn record_expense(
        &self,
        user_id: &str,
        category_id: &str,
        month: u32,
        year: i32,
        amount: Decimal,
    ) -> Result<()> {
        let Some(mut budget) = self
            .repository
            .find_by_bucket(user_id, category_id, month, year)?
        else {
            // An expense in a category with no budget for the period has no
            // budget effect.
            debug!(
                "No budget bucket for user {} category {} {}/{}; expense not tracked",
                user_id, category_id, month, year
            );
            return Ok(());
        };

        budget.spent += amount;
        budget.status = if budget.spent >= budget.amount {
            BudgetStatus::Exceeded
        } else {
            BudgetStatus::Active
        };
        budget.updated_at = self.clock.now();

        debug!(
            "Budget {} spent {} of {} ({:?})",
            budget.id, budget.spent, budget.amount, budget.status
        );

        self.repository.save_spent(&budget)
    }
}
