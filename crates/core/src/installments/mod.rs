//! Installments module - amortized purchase plans and their schedules.

mod installments_errors;
mod installments_model;
mod installments_service;
mod installments_traits;
mod schedule;

#[cfg(test)]
mod installments_service_tests;

pub use installments_errors::InstallmentError;
pub use installments_model::{
    Installment, InstallmentGroup, InstallmentStatus, NewInstallmentGroup,
};
pub use installments_service::InstallmentService;
pub use installments_traits::{InstallmentRepositoryTrait, InstallmentServiceTrait};
pub use schedule::{due_date, split_amount};
