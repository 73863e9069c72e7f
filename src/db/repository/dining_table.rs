//! Dining Table Repository (Table Registry)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, TableStatus};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let table = sqlx::query_as::<_, DiningTable>(
            "SELECT id, capacity, status, notes FROM dining_tables WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(table)
    }

    /// Find all tables with the given status, ordered by id (stable for pagination)
    pub async fn find_by_status(&self, status: TableStatus) -> RepoResult<Vec<DiningTable>> {
        let tables = sqlx::query_as::<_, DiningTable>(
            "SELECT id, capacity, status, notes FROM dining_tables WHERE status = ? ORDER BY id",
        )
        .bind(status)
        .fetch_all(self.base.pool())
        .await?;
        Ok(tables)
    }

    /// Set table status
    ///
    /// Existence check only - whether the transition is *allowed* is
    /// the orchestrator's business.
    pub async fn set_status(&self, id: &str, status: TableStatus) -> RepoResult<()> {
        let result = sqlx::query("UPDATE dining_tables SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(self.base.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Table {} not found", id)));
        }
        Ok(())
    }

    /// Conditionally claim a table inside a transaction.
    ///
    /// The availability check and the status write are one statement,
    /// so two concurrent claims can never both succeed. Returns false
    /// when the table was not `available` at write time.
    pub async fn try_occupy(conn: &mut SqliteConnection, id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE dining_tables SET status = 'occupied' WHERE id = ? AND status = 'available'",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Return a table to `available` inside a transaction.
    pub async fn release(conn: &mut SqliteConnection, id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE dining_tables SET status = 'available' WHERE id = ? AND status = 'occupied'",
        )
        .bind(id)
        .execute(conn)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Table {} not found or not occupied",
                id
            )));
        }
        Ok(())
    }
}
