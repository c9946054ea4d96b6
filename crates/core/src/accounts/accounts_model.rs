//! Account domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of account, as displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    CreditCard,
    Investment,
    Cash,
}

/// Domain model representing an account.
///
/// `balance` is mutated only through the ledger effect protocol
/// ([`crate::accounts::AccountLedger`]); it is never set directly by
/// unrelated code, and [`AccountUpdate`] deliberately excludes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub id: Option<String>,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    /// Opening balance; defaults to zero.
    pub balance: Option<Decimal>,
}

/// Input model for updating an account's descriptive fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
}
