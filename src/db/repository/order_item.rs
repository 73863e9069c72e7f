//! Order Item Repository (Order Item Ledger)
//!
//! Item ids are allocated per order inside the insert transaction, so
//! lookups are always scoped by the owning order.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{NewOrderItem, OrderItem, OrderItemStatus};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Clone)]
pub struct OrderItemRepository {
    base: BaseRepository,
}

impl OrderItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find an item by its order-scoped id
    pub async fn find_by_id(&self, order_id: &str, item_id: i64) -> RepoResult<Option<OrderItem>> {
        let item = sqlx::query_as::<_, OrderItem>(
            "SELECT order_id, id, menu_item_id, quantity, notes, status \
             FROM order_items WHERE order_id = ? AND id = ?",
        )
        .bind(order_id)
        .bind(item_id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(item)
    }

    /// All items of an order, in id order
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT order_id, id, menu_item_id, quantity, notes, status \
             FROM order_items WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(items)
    }

    /// Bulk insert inside a transaction - the caller's commit/rollback
    /// makes this all-or-nothing. Ids continue the order's sequence.
    pub async fn insert_bulk(
        conn: &mut SqliteConnection,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> RepoResult<Vec<OrderItem>> {
        let next_id = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(id), 0) + 1 FROM order_items WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_one(&mut *conn)
        .await?;

        let mut inserted = Vec::with_capacity(items.len());
        for (offset, item) in items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(RepoError::Validation(format!(
                    "quantity must be positive, got {}",
                    item.quantity
                )));
            }

            let row = OrderItem {
                order_id: order_id.to_string(),
                id: next_id + offset as i64,
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
                notes: item.notes.clone(),
                status: OrderItemStatus::Pending,
            };

            sqlx::query(
                "INSERT INTO order_items (order_id, id, menu_item_id, quantity, notes, status) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&row.order_id)
            .bind(row.id)
            .bind(row.menu_item_id)
            .bind(row.quantity)
            .bind(&row.notes)
            .bind(row.status)
            .execute(&mut *conn)
            .await?;

            inserted.push(row);
        }

        Ok(inserted)
    }

    /// Set an item's preparation status inside a transaction.
    ///
    /// The caller re-checks the owning order in the same transaction,
    /// so the write never lands on a closed order.
    pub async fn set_status(
        conn: &mut SqliteConnection,
        order_id: &str,
        item_id: i64,
        status: OrderItemStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query("UPDATE order_items SET status = ? WHERE order_id = ? AND id = ?")
            .bind(status)
            .bind(order_id)
            .bind(item_id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Item {} not found in order {}",
                item_id, order_id
            )));
        }
        Ok(())
    }
}
