//! Installment repository and service traits.

use async_trait::async_trait;

use super::installments_model::{Installment, InstallmentGroup, NewInstallmentGroup};
use crate::errors::Result;

/// Trait defining the contract for installment persistence.
///
/// The group exclusively owns its installments: group-level writes persist
/// the group row and every contained installment in one atomic commit.
#[async_trait]
pub trait InstallmentRepositoryTrait: Send + Sync {
    /// Persists a new group together with all of its installments.
    async fn create_group(&self, group: InstallmentGroup) -> Result<InstallmentGroup>;

    /// Overwrites a group and its installments.
    async fn save_group(&self, group: &InstallmentGroup) -> Result<()>;

    /// Deletes a group and, cascading, its installments.
    async fn delete_group(&self, group_id: &str, user_id: &str) -> Result<usize>;

    /// Retrieves a group (with installments) owned by the given user.
    fn get_group(&self, group_id: &str, user_id: &str) -> Result<InstallmentGroup>;

    /// Lists all groups owned by the given user.
    fn list_groups(&self, user_id: &str) -> Result<Vec<InstallmentGroup>>;

    /// Retrieves a single installment whose parent group is owned by the
    /// given user.
    fn get_installment(&self, installment_id: &str, user_id: &str) -> Result<Installment>;

    /// Overwrites a single installment.
    ///
    /// Called inside the payment protocol's atomic-commit closure together
    /// with the expense the payment materializes; must not start its own
    /// storage transaction.
    fn save_installment(&self, installment: &Installment) -> Result<()>;
}

/// Trait defining the contract for the installment scheduler.
#[async_trait]
pub trait InstallmentServiceTrait: Send + Sync {
    /// Expands a plan into its dated, exact-sum schedule and persists the
    /// group atomically. No balance moves at creation time.
    async fn create_group(
        &self,
        new_group: NewInstallmentGroup,
        user_id: &str,
    ) -> Result<InstallmentGroup>;

    /// Pays one pending installment: materializes a completed expense
    /// transaction through the transaction engine and marks the installment
    /// settled, linking the transaction. Both writes commit together or not
    /// at all.
    async fn pay_installment(&self, installment_id: &str, user_id: &str) -> Result<Installment>;

    /// Cancels every still-pending installment of the group. Completed
    /// installments are untouched; idempotent.
    async fn cancel_group(&self, group_id: &str, user_id: &str) -> Result<()>;

    /// Deletes a group and its installments.
    async fn delete_group(&self, group_id: &str, user_id: &str) -> Result<()>;

    /// Retrieves a group scoped to its owner.
    fn get_group(&self, group_id: &str, user_id: &str) -> Result<InstallmentGroup>;

    /// Lists all groups owned by the user.
    fn list_groups(&self, user_id: &str) -> Result<Vec<InstallmentGroup>>;
}
