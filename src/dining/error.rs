//! Dining errors
//!
//! Every precondition violation is a distinct variant so the boundary
//! layer can switch on kind, never on message or identity. Store
//! connectivity failures are wrapped into [`DiningError::Store`] and
//! surface to clients as an opaque internal failure.

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Orchestrator errors
#[derive(Debug, Error)]
pub enum DiningError {
    #[error("Table not found: {0}")]
    UnknownTable(String),

    #[error("Table {0} is not available")]
    TableNotAvailable(String),

    #[error("Order not found: {0}")]
    UnknownOrder(String),

    #[error("Order {0} is not ongoing")]
    OrderNotOngoing(String),

    #[error("Item {item_id} not found in order {order_id}")]
    UnknownOrderItem { order_id: String, item_id: i64 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type DiningResult<T> = Result<T, DiningError>;

impl From<RepoError> for DiningError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(msg) => DiningError::Validation(msg),
            // NotFound/Duplicate reaching here mean a write raced past
            // the orchestrator's precondition read; the service maps
            // the meaningful cases explicitly before using `?`.
            other => DiningError::Store(other.to_string()),
        }
    }
}

impl From<DiningError> for AppError {
    fn from(err: DiningError) -> Self {
        match err {
            DiningError::UnknownTable(_)
            | DiningError::UnknownOrder(_)
            | DiningError::UnknownOrderItem { .. } => AppError::NotFound(err.to_string()),
            DiningError::TableNotAvailable(_) | DiningError::OrderNotOngoing(_) => {
                AppError::Conflict(err.to_string())
            }
            DiningError::Validation(msg) => AppError::Validation(msg),
            DiningError::Store(msg) => AppError::Database(msg),
        }
    }
}
