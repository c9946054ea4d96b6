//! Installment business-rule violations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallmentError {
    #[error("Installment already paid")]
    AlreadyPaid,

    #[error("Installment is cancelled")]
    Cancelled,

    #[error("An installment plan needs at least {min} installments, got {got}")]
    InvalidCount { min: u32, got: u32 },
}
