//! Repository Module
//!
//! Per-entity data access over the SQLite pool. Repositories are
//! deliberately policy-free: existence checks only, no state-machine
//! enforcement. Write methods that must compose inside a transaction
//! take an explicit `&mut SqliteConnection` so the dining store can
//! commit multi-ledger writes as one atomic unit.

pub mod dining_table;
pub mod employee;
pub mod menu_item;
pub mod order;
pub mod order_item;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use employee::EmployeeRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;

use crate::utils::AppError;
use sqlx::SqlitePool;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with pool reference
#[derive(Clone)]
pub struct BaseRepository {
    pool: SqlitePool,
}

impl BaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
