use std::sync::Arc;

use chrono::Datelike;
use rust_decimal::Decimal;

use super::reports_model::FinancialSummary;
use super::reports_traits::ReportsServiceTrait;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::time::Clock;
use crate::transactions::{TransactionRepositoryTrait, TransactionStatus, TransactionType};

/// Read-only aggregation over accounts and transactions.
///
/// Income and expense sums count COMPLETED transactions only, bucketed by
/// their transaction date. Transfers move money between the user's own
/// accounts and are counted in neither flow.
pub struct ReportsService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl ReportsService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            account_repository,
            transaction_repository,
            clock,
        }
    }
}

impl ReportsServiceTrait for ReportsService {
    fn current_summary(&self, user_id: &str) -> Result<FinancialSummary> {
        let today = self.clock.today();
        self.monthly_summary(user_id, today.month(), today.year())
    }

    fn monthly_summary(&self, user_id: &str, month: u32, year: i32) -> Result<FinancialSummary> {
        if !(1..=12).contains(&month) {
            return Err(
                ValidationError::InvalidInput(format!("month {} out of range 1-12", month)).into(),
            );
        }

        let total_balance: Decimal = self
            .account_repository
            .list(user_id)?
            .iter()
            .map(|account| account.balance)
            .sum();

        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for transaction in self.transaction_repository.list(user_id)? {
            if transaction.status != TransactionStatus::Completed
                || transaction.transaction_date.month() != month
                || transaction.transaction_date.year() != year
            {
                continue;
            }
            match transaction.transaction_type {
                TransactionType::Income => income += transaction.amount,
                TransactionType::Expense => expenses += transaction.amount,
                TransactionType::Transfer => {}
            }
        }

        Ok(FinancialSummary {
            month,
            year,
            total_balance,
            income,
            expenses,
            net: income - expenses,
        })
    }
}
