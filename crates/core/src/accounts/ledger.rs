//! Account ledger: the signed balance effect of a transaction.
//!
//! The effect of a transaction on its accounts is a pure function of its
//! (type, amount, status) tuple. Reversal is the algebraic negation of that
//! effect, so applying then reversing the same recorded state is the
//! identity operation on every touched balance.

use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::accounts_traits::AccountRepositoryTrait;
use crate::errors::Result;
use crate::transactions::{Transaction, TransactionStatus, TransactionType};

/// Signed balance delta a transaction applies to its source account.
///
/// Zero unless the transaction is COMPLETED: a PENDING transaction has no
/// balance effect. INCOME credits the account; EXPENSE and the source leg of
/// a TRANSFER debit it.
pub fn balance_effect(
    transaction_type: TransactionType,
    amount: Decimal,
    status: TransactionStatus,
) -> Decimal {
    if status != TransactionStatus::Completed {
        return Decimal::ZERO;
    }
    match transaction_type {
        TransactionType::Income => amount,
        TransactionType::Expense | TransactionType::Transfer => -amount,
    }
}

/// Signed balance delta a transaction applies to its destination account.
///
/// Non-zero only for a COMPLETED TRANSFER, which credits the destination.
pub fn destination_effect(
    transaction_type: TransactionType,
    amount: Decimal,
    status: TransactionStatus,
) -> Decimal {
    if status != TransactionStatus::Completed || transaction_type != TransactionType::Transfer {
        return Decimal::ZERO;
    }
    amount
}

/// Applies or reverses the balance effect of one transaction on one or two
/// accounts, persisting the mutated account rows through the repository.
///
/// This is the only mutation path into `Account::balance`.
pub struct AccountLedger {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountLedger {
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Applies the transaction's effect to its account(s).
    pub fn apply(&self, transaction: &Transaction) -> Result<()> {
        self.shift(transaction, Decimal::ONE)
    }

    /// Reverses the effect of the transaction's recorded state.
    ///
    /// Must be called with the state as it was last persisted (its type,
    /// amount, accounts, and status at that time), before any update or
    /// delete overwrites it.
    pub fn reverse(&self, transaction: &Transaction) -> Result<()> {
        self.shift(transaction, Decimal::NEGATIVE_ONE)
    }

    fn shift(&self, transaction: &Transaction, sign: Decimal) -> Result<()> {
        let delta = sign
            * balance_effect(
                transaction.transaction_type,
                transaction.amount,
                transaction.status,
            );
        if !delta.is_zero() {
            let mut account = self
                .repository
                .get_by_id(&transaction.account_id, &transaction.user_id)?;
            account.balance += delta;
            debug!(
                "Ledger effect {} on account {}: new balance {}",
                delta, account.id, account.balance
            );
            self.repository.save_balance(&account)?;
        }

        let destination_delta = sign
            * destination_effect(
                transaction.transaction_type,
                transaction.amount,
                transaction.status,
            );
        if !destination_delta.is_zero() {
            if let Some(destination_id) = &transaction.destination_account_id {
                let mut destination = self
                    .repository
                    .get_by_id(destination_id, &transaction.user_id)?;
                destination.balance += destination_delta;
                debug!(
                    "Ledger effect {} on destination account {}: new balance {}",
                    destination_delta, destination.id, destination.balance
                );
                self.repository.save_balance(&destination)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pending_has_zero_effect() {
        assert_eq!(
            balance_effect(
                TransactionType::Income,
                dec!(100.00),
                TransactionStatus::Pending
            ),
            Decimal::ZERO
        );
        assert_eq!(
            destination_effect(
                TransactionType::Transfer,
                dec!(100.00),
                TransactionStatus::Pending
            ),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_completed_effects_by_type() {
        assert_eq!(
            balance_effect(
                TransactionType::Income,
                dec!(3000.00),
                TransactionStatus::Completed
            ),
            dec!(3000.00)
        );
        assert_eq!(
            balance_effect(
                TransactionType::Expense,
                dec!(50.00),
                TransactionStatus::Completed
            ),
            dec!(-50.00)
        );
        assert_eq!(
            balance_effect(
                TransactionType::Transfer,
                dec!(75.00),
                TransactionStatus::Completed
            ),
            dec!(-75.00)
        );
        assert_eq!(
            destination_effect(
                TransactionType::Transfer,
                dec!(75.00),
                TransactionStatus::Completed
            ),
            dec!(75.00)
        );
    }

    #[test]
    fn test_destination_effect_only_for_transfers() {
        assert_eq!(
            destination_effect(
                TransactionType::Income,
                dec!(10.00),
                TransactionStatus::Completed
            ),
            Decimal::ZERO
        );
        assert_eq!(
            destination_effect(
                TransactionType::Expense,
                dec!(10.00),
                TransactionStatus::Completed
            ),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_effect_plus_reversal_is_identity() {
        for transaction_type in [
            TransactionType::Income,
            TransactionType::Expense,
            TransactionType::Transfer,
        ] {
            for status in [TransactionStatus::Pending, TransactionStatus::Completed] {
                let applied = balance_effect(transaction_type, dec!(123.45), status);
                let reversed = -balance_effect(transaction_type, dec!(123.45), status);
                assert_eq!(applied + reversed, Decimal::ZERO);

                let applied = destination_effect(transaction_type, dec!(123.45), status);
                let reversed = -destination_effect(transaction_type, dec!(123.45), status);
                assert_eq!(applied + reversed, Decimal::ZERO);
            }
        }
    }
}
