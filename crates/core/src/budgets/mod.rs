//! Budgets module - domain models, services, and traits.

mod budgets_errors;
mod budgets_model;
mod budgets_service;
mod budgets_traits;


pub use budgets_errors::BudgetError;
pub use budgets_model::{Budget, BudgetStatus, NewBudget};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
