use chrono::Datelike;
use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionStatus, TransactionType,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::{AccountLedger, AccountRepositoryTrait};
use crate::budgets::BudgetServiceTrait;
use crate::categories::CategoryResolverTrait;
use crate::db::TransactionExecutor;
use crate::errors::Result;
use crate::time::Clock;

/// The transaction engine: validates and persists transactions, orchestrating
/// ledger effects on one or two accounts and budget spend recording.
///
/// Generic over the atomic-commit executor so every reverse-then-apply
/// sequence commits together with the transaction record, or not at all.
pub struct TransactionService<E: TransactionExecutor> {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    category_resolver: Arc<dyn CategoryResolverTrait>,
    budget_service: Arc<dyn BudgetServiceTrait>,
    ledger: AccountLedger,
    clock: Arc<dyn Clock>,
    transaction_executor: E,
}

impl<E: TransactionExecutor> TransactionService<E> {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        category_resolver: Arc<dyn CategoryResolverTrait>,
        budget_service: Arc<dyn BudgetServiceTrait>,
        clock: Arc<dyn Clock>,
        transaction_executor: E,
    ) -> Self {
        let ledger = AccountLedger::new(account_repository.clone());
        Self {
            transaction_repository,
            account_repository,
            category_resolver,
            budget_service,
            ledger,
            clock,
            transaction_executor,
        }
    }

    /// Resolves every foreign key in the request scoped to the user.
    ///
    /// Runs before any mutation so an unresolved id aborts with no partial
    /// balance or budget change.
    fn resolve_references(&self, request: &NewTransaction, user_id: &str) -> Result<()> {
        self.account_repository
            .get_by_id(&request.account_id, user_id)?;
        if let Some(destination_id) = &request.destination_account_id {
            self.account_repository.get_by_id(destination_id, user_id)?;
        }
        if let Some(category_id) = &request.category_id {
            self.category_resolver.get_by_id(category_id, user_id)?;
        }
        Ok(())
    }

    /// Records the budget spend for a completed categorized expense.
    ///
    /// Only transaction creation feeds the budget accumulator; updates and
    /// deletes deliberately do not adjust it (documented limitation of the
    /// spent counter, preserved as-is).
    fn record_budget_expense(&self, transaction: &Transaction) -> Result<()> {
        if transaction.status != TransactionStatus::Completed
            || transaction.transaction_type != TransactionType::Expense
        {
            return Ok(());
        }
        let Some(category_id) = &transaction.category_id else {
            return Ok(());
        };
        self.budget_service.record_expense(
            &transaction.user_id,
            category_id,
            transaction.transaction_date.month(),
            transaction.transaction_date.year(),
            transaction.amount,
        )
    }
}

#[async_trait]
impl<E: TransactionExecutor> TransactionServiceTrait for TransactionService<E> {
    async fn create_transaction(
        &self,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction> {
        self.transaction_executor
            .execute(|| self.create_transaction_in_tx(request, user_id))
    }

    fn create_transaction_in_tx(
        &self,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction> {
        request.validate()?;
        self.resolve_references(&request, user_id)?;

        let now = self.clock.now();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            account_id: request.account_id,
            category_id: request.category_id,
            destination_account_id: request.destination_account_id,
            description: request.description,
            amount: request.amount,
            transaction_type: request.transaction_type,
            status: request.status,
            transaction_date: request.transaction_date,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        debug!(
            "Creating {:?} transaction {} for user {}",
            transaction.transaction_type, transaction.id, user_id
        );

        self.ledger.apply(&transaction)?;
        let saved = self.transaction_repository.insert(transaction)?;
        self.record_budget_expense(&saved)?;
        Ok(saved)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        request: NewTransaction,
        user_id: &str,
    ) -> Result<Transaction> {
        request.validate()?;
        let existing = self
            .transaction_repository
            .get_by_id(transaction_id, user_id)?;
        self.resolve_references(&request, user_id)?;

        let mut updated = existing.clone();
        updated.account_id = request.account_id;
        updated.category_id = request.category_id;
        updated.destination_account_id = request.destination_account_id;
        updated.description = request.description;
        updated.amount = request.amount;
        updated.transaction_type = request.transaction_type;
        updated.status = request.status;
        updated.transaction_date = request.transaction_date;
        updated.notes = request.notes;
        updated.updated_at = self.clock.now();

        debug!("Updating transaction {} for user {}", transaction_id, user_id);

        // Undo the effect of the previously persisted state, then apply the
        // new one. Budget spend is not re-recorded here.
        self.transaction_executor.execute(|| {
            self.ledger.reverse(&existing)?;
            self.ledger.apply(&updated)?;
            self.transaction_repository.save(&updated)?;
            Ok(updated)
        })
    }

    async fn delete_transaction(&self, transaction_id: &str, user_id: &str) -> Result<()> {
        let existing = self
            .transaction_repository
            .get_by_id(transaction_id, user_id)?;

        debug!("Deleting transaction {} for user {}", transaction_id, user_id);

        self.transaction_executor.execute(|| {
            self.ledger.reverse(&existing)?;
            self.transaction_repository.remove(transaction_id, user_id)?;
            Ok(())
        })
    }

    fn get_transaction(&self, transaction_id: &str, user_id: &str) -> Result<Transaction> {
        self.transaction_repository.get_by_id(transaction_id, user_id)
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.transaction_repository.list(user_id)
    }
}
