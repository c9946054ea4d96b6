use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::installments_errors::InstallmentError;
use super::installments_model::{
    Installment, InstallmentGroup, InstallmentStatus, NewInstallmentGroup,
};
use super::installments_traits::{InstallmentRepositoryTrait, InstallmentServiceTrait};
use super::schedule::{due_date, split_amount};
use crate::accounts::AccountRepositoryTrait;
use crate::categories::CategoryResolverTrait;
use crate::constants::MIN_INSTALLMENT_COUNT;
use crate::db::TransactionExecutor;
use crate::errors::{Result, ValidationError};
use crate::time::Clock;
use crate::transactions::{
    NewTransaction, TransactionServiceTrait, TransactionStatus, TransactionType,
};

/// The installment scheduler: expands purchase plans into exact-sum
/// schedules and drives single-installment payment through the transaction
/// engine.
///
/// Generic over the atomic-commit executor so the expense a payment
/// materializes and the installment settle commit together, or not at all.
pub struct InstallmentService<E: TransactionExecutor> {
    repository: Arc<dyn InstallmentRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    category_resolver: Arc<dyn CategoryResolverTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    clock: Arc<dyn Clock>,
    transaction_executor: E,
}

impl<E: TransactionExecutor> InstallmentService<E> {
    pub fn new(
        repository: Arc<dyn InstallmentRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        category_resolver: Arc<dyn CategoryResolverTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        clock: Arc<dyn Clock>,
        transaction_executor: E,
    ) -> Self {
        Self {
            repository,
            account_repository,
            category_resolver,
            transaction_service,
            clock,
            transaction_executor,
        }
    }

    fn generate_installments(group: &InstallmentGroup) -> Result<Vec<Installment>> {
        let amounts = split_amount(group.total_amount, group.installment_count);

        amounts
            .into_iter()
            .enumerate()
            .map(|(index, amount)| {
                let due = due_date(group.start_date, index as u32).ok_or_else(|| {
                    ValidationError::InvalidInput(format!(
                        "due date overflows calendar at installment {}",
                        index + 1
                    ))
                })?;
                Ok(Installment {
                    id: Uuid::new_v4().to_string(),
                    group_id: group.id.clone(),
                    transaction_id: None,
                    installment_number: index as u32 + 1,
                    amount,
                    due_date: due,
                    status: InstallmentStatus::Pending,
                    created_at: group.created_at,
                })
            })
            .collect()
    }
}

#[async_trait]
impl<E: TransactionExecutor> InstallmentServiceTrait for InstallmentService<E> {
    async fn create_group(
        &self,
        new_group: NewInstallmentGroup,
        user_id: &str,
    ) -> Result<InstallmentGroup> {
        if new_group.installment_count < MIN_INSTALLMENT_COUNT {
            return Err(InstallmentError::InvalidCount {
                min: MIN_INSTALLMENT_COUNT,
                got: new_group.installment_count,
            }
            .into());
        }
        if new_group.total_amount <= Decimal::ZERO {
            return Err(
                ValidationError::InvalidInput("total amount must be positive".to_string()).into(),
            );
        }

        // Resolve foreign keys before building anything.
        self.account_repository
            .get_by_id(&new_group.account_id, user_id)?;
        if let Some(category_id) = &new_group.category_id {
            self.category_resolver.get_by_id(category_id, user_id)?;
        }

        let mut group = InstallmentGroup {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            account_id: new_group.account_id,
            category_id: new_group.category_id,
            description: new_group.description,
            total_amount: new_group.total_amount,
            installment_count: new_group.installment_count,
            start_date: new_group.start_date,
            notes: new_group.notes,
            installments: Vec::new(),
            created_at: self.clock.now(),
        };
        group.installments = Self::generate_installments(&group)?;

        debug!(
            "Creating installment group {} ({} x {}) for user {}",
            group.id, group.installment_count, group.total_amount, user_id
        );

        self.repository.create_group(group).await
    }

    async fn pay_installment(&self, installment_id: &str, user_id: &str) -> Result<Installment> {
        let installment = self.repository.get_installment(installment_id, user_id)?;

        match installment.status {
            InstallmentStatus::Completed => return Err(InstallmentError::AlreadyPaid.into()),
            InstallmentStatus::Cancelled => return Err(InstallmentError::Cancelled.into()),
            InstallmentStatus::Pending => {}
        }

        let group = self.repository.get_group(&installment.group_id, user_id)?;

        // The payment date is "now", not the installment's due date.
        let request = NewTransaction {
            account_id: group.account_id.clone(),
            category_id: group.category_id.clone(),
            destination_account_id: None,
            description: format!(
                "{} ({}/{})",
                group.description, installment.installment_number, group.installment_count
            ),
            amount: installment.amount,
            transaction_type: TransactionType::Expense,
            status: TransactionStatus::Completed,
            transaction_date: self.clock.today(),
            notes: None,
        };

        // The expense is what actually moves money and feeds the budget; it
        // must commit together with the settle, otherwise a failure between
        // the two would leave the installment payable a second time.
        let paid = self.transaction_executor.execute(|| {
            let transaction = self
                .transaction_service
                .create_transaction_in_tx(request, user_id)?;

            let mut paid = installment;
            paid.status = InstallmentStatus::Completed;
            paid.transaction_id = Some(transaction.id);
            self.repository.save_installment(&paid)?;
            Ok(paid)
        })?;

        debug!(
            "Paid installment {}/{} of group {}",
            paid.installment_number, group.installment_count, group.id
        );

        Ok(paid)
    }

    async fn cancel_group(&self, group_id: &str, user_id: &str) -> Result<()> {
        let mut group = self.repository.get_group(group_id, user_id)?;

        // Unpaid installments never had a balance or budget effect, so there
        // is nothing to reverse.
        for installment in &mut group.installments {
            if installment.status == InstallmentStatus::Pending {
                installment.status = InstallmentStatus::Cancelled;
            }
        }

        self.repository.save_group(&group).await
    }

    async fn delete_group(&self, group_id: &str, user_id: &str) -> Result<()> {
        self.repository.delete_group(group_id, user_id).await?;
        Ok(())
    }

    fn get_group(&self, group_id: &str, user_id: &str) -> Result<InstallmentGroup> {
        self.repository.get_group(group_id, user_id)
    }

    fn list_groups(&self, user_id: &str) -> Result<Vec<InstallmentGroup>> {
        self.repository.list_groups(user_id)
    }
}
