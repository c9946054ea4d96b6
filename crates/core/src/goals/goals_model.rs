//! Goal domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::percentage_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    InProgress,
    Completed,
}

/// Domain model representing a savings goal.
///
/// Invariant: `status == Completed` iff `current_amount >= target_amount`;
/// once completed, a goal rejects further deposits and edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Target minus saved amount; never reported below zero.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Progress as a percentage of the target, zero for a zero target.
    pub fn percentage_completed(&self) -> Decimal {
        percentage_of(self.current_amount, self.target_amount)
    }
}

/// Input model for creating a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    /// Opening saved amount; defaults to zero.
    pub current_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Input model for editing a goal's descriptive fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub notes: Option<String>,
}
