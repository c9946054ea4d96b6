//! Reports module - derived financial summaries over accounts and
//! transactions.

mod reports_model;
mod reports_service;
mod reports_traits;


pub use reports_model::FinancialSummary;
pub use reports_service::ReportsService;
pub use reports_traits::ReportsServiceTrait;
