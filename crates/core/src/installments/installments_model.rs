//! Installment domain models.
//!
//! An [`InstallmentGroup`] is one amortized purchase plan; it exclusively
//! owns its [`Installment`]s (cascading create/delete, no independent
//! lifecycle). Installments are generated all at once when the group is
//! created and individually transition PENDING -> COMPLETED (payment) or
//! PENDING -> CANCELLED (group cancellation); both end states are terminal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// One dated partial charge of an amortized plan.
///
/// No balance moves until the installment is paid; payment links the
/// materialized expense transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: String,
    pub group_id: String,
    /// The expense transaction created on payment.
    pub transaction_id: Option<String>,
    /// 1-based position in the plan.
    pub installment_number: u32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Domain model representing an amortized purchase plan.
///
/// Invariant: the installment amounts sum to `total_amount` exactly; the
/// first installment absorbs any rounding remainder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentGroup {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub category_id: Option<String>,
    pub description: String,
    pub total_amount: Decimal,
    pub installment_count: u32,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
    pub installments: Vec<Installment>,
    pub created_at: DateTime<Utc>,
}

impl InstallmentGroup {
    /// Number of installments already paid.
    pub fn paid_count(&self) -> usize {
        self.installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Completed)
            .count()
    }
}

/// Input model for creating an amortized purchase plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstallmentGroup {
    pub account_id: String,
    pub category_id: Option<String>,
    pub description: String,
    pub total_amount: Decimal,
    pub installment_count: u32,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
}
