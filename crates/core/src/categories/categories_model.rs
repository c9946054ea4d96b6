//! Category domain model.

use serde::{Deserialize, Serialize};

/// Domain model representing a transaction category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}
