//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy status (桌台状态)
///
/// `occupied` must hold exactly when the table has an `ongoing` order;
/// only the dining orchestrator is allowed to move a table between
/// `available` and `occupied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Closed,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Closed => "closed",
        }
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiningTable {
    pub id: String,
    pub capacity: i64,
    pub status: TableStatus,
    pub notes: Option<String>,
}
