//! Order Repository (Order Ledger)
//!
//! Orders are never physically deleted; `completed` and `cancelled`
//! are terminal statuses. Transition legality is checked by the
//! dining orchestrator, never here, so the writes stay composable
//! inside a single transaction with the table update.

use super::{BaseRepository, RepoResult};
use crate::db::models::{Order, OrderStatus, OrderType};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, order_type, table_id, employee_id, status, created_at, completed_at \
             FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(order)
    }

    /// Find the ongoing order for a table, if any
    ///
    /// At most one exists per table (orchestrator invariant).
    pub async fn find_ongoing_by_table(&self, table_id: &str) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, order_type, table_id, employee_id, status, created_at, completed_at \
             FROM orders WHERE table_id = ? AND status = 'ongoing'",
        )
        .bind(table_id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(order)
    }

    /// Insert a new ongoing dining order inside a transaction
    pub async fn insert(
        conn: &mut SqliteConnection,
        table_id: &str,
        employee_id: &str,
    ) -> RepoResult<Order> {
        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_type: OrderType::Dining,
            table_id: table_id.to_string(),
            employee_id: employee_id.to_string(),
            status: OrderStatus::Ongoing,
            created_at: Utc::now(),
            completed_at: None,
        };

        sqlx::query(
            "INSERT INTO orders (id, order_type, table_id, employee_id, status, created_at, completed_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.id)
        .bind(order.order_type)
        .bind(&order.table_id)
        .bind(&order.employee_id)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.completed_at)
        .execute(conn)
        .await?;

        Ok(order)
    }

    /// Conditionally move an ongoing order to a terminal status inside
    /// a transaction, stamping `completed_at`.
    ///
    /// Returns false when the order was not `ongoing` at write time
    /// (already closed by a concurrent request, or unknown).
    pub async fn try_close(
        conn: &mut SqliteConnection,
        id: &str,
        status: OrderStatus,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE orders SET status = ?, completed_at = ? WHERE id = ? AND status = 'ongoing'",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Re-read an order's status inside a transaction
    pub async fn status_in_tx(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> RepoResult<Option<OrderStatus>> {
        let status = sqlx::query_scalar::<_, OrderStatus>("SELECT status FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(status)
    }
}
