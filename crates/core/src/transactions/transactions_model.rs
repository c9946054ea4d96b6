//! Transaction domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_errors::TransactionError;
use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

/// A transaction's account-balance effect is defined only when COMPLETED;
/// a PENDING transaction has zero balance effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
}

/// Domain model representing a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub category_id: Option<String>,
    /// Present and distinct from `account_id` iff `transaction_type` is TRANSFER.
    pub destination_account_id: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub transaction_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a transaction, also used to overwrite every
/// mutable field on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub account_id: String,
    pub category_id: Option<String>,
    pub destination_account_id: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub transaction_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Business-rule validation, run before any mutation.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount.into());
        }

        if self.transaction_type == TransactionType::Transfer {
            match self.destination_account_id.as_deref() {
                None => return Err(TransactionError::DestinationRequired.into()),
                Some(destination_id) if destination_id == self.account_id => {
                    return Err(TransactionError::SameSourceAndDestination.into())
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
