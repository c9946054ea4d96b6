//! Transaction business-rule violations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Destination account is required for transfers")]
    DestinationRequired,

    #[error("Source and destination accounts must be different")]
    SameSourceAndDestination,

    #[error("Transaction amount must be positive")]
    NonPositiveAmount,
}
