//! Finly Core - Ledger consistency engine for personal finances.
//!
//! This crate contains the core business logic that keeps account balances,
//! budget accumulators, and installment schedules correct as transactions
//! are created, edited, reversed, deleted, or generated from an amortized
//! purchase plan. It is storage-agnostic and defines repository traits that
//! are implemented by an external durable store.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod constants;
pub mod db;
pub mod errors;
pub mod goals;
pub mod installments;
pub mod money;
pub mod reports;
pub mod time;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
