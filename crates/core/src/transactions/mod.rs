//! Transactions module - domain models, engine service, and traits.

mod transactions_errors;
mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use transactions_errors::TransactionError;
pub use transactions_model::{
    NewTransaction, Transaction, TransactionStatus, TransactionType,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
