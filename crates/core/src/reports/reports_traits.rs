//! Report service traits.

use super::reports_model::FinancialSummary;
use crate::errors::Result;

/// Trait defining the contract for derived financial summaries.
pub trait ReportsServiceTrait: Send + Sync {
    /// Summary for the month the clock currently points at.
    fn current_summary(&self, user_id: &str) -> Result<FinancialSummary>;

    /// Summary for an arbitrary month/year period.
    fn monthly_summary(&self, user_id: &str, month: u32, year: i32) -> Result<FinancialSummary>;
}
