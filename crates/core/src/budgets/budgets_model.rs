//! Budget domain models.
//!
//! A budget is a spend limit for one (user, category, month, year) bucket.
//! `spent` is a monotone accumulator fed by completed categorized expenses;
//! it is never decremented when a transaction is later edited or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::percentage_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetStatus {
    #[default]
    Active,
    Exceeded,
}

/// Domain model representing a budget bucket.
///
/// Unique per (user, category, month, year). Invariant after every spend
/// recording: `status == Exceeded` iff `spent >= amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    /// The spend limit.
    pub amount: Decimal,
    /// Accumulated completed expenses for the bucket.
    pub spent: Decimal,
    /// Calendar month, 1-12.
    pub month: u32,
    pub year: i32,
    pub status: BudgetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Limit minus accumulated spend; negative once over budget.
    pub fn remaining(&self) -> Decimal {
        self.amount - self.spent
    }

    /// Spend as a percentage of the limit, zero for a zero limit.
    pub fn percentage_used(&self) -> Decimal {
        percentage_of(self.spent, self.amount)
    }
}

/// Input model for creating a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category_id: String,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
}
