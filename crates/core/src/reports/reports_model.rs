//! Report domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated financial position for one month: the total balance across
/// all of a user's accounts plus the month's completed income and expense
/// flows.
///
/// Derived entirely from persisted accounts and transactions; nothing here
/// is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub month: u32,
    pub year: i32,
    pub total_balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    /// `income - expenses` for the period.
    pub net: Decimal,
}
