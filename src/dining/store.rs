//! Dining store seam
//!
//! [`DiningStore`] is the storage contract the orchestrator runs on:
//! plain reads over the three ledgers, plus the write units that must
//! commit atomically. The conditional writes report their outcome as
//! `Option` - `None` means the precondition no longer held at write
//! time - so the policy (which typed error that becomes) stays in the
//! service.
//!
//! One relational implementation exists ([`SqliteDiningStore`]); the
//! seam is kept for testability, not for swappable backends.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::models::{
    DiningTable, NewOrderItem, Order, OrderItem, OrderItemStatus, OrderStatus, TableStatus,
};
use crate::db::repository::{
    DiningTableRepository, OrderItemRepository, OrderRepository, RepoError, RepoResult,
};

#[async_trait]
pub trait DiningStore: Send + Sync {
    async fn table_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>>;

    async fn tables_by_status(&self, status: TableStatus) -> RepoResult<Vec<DiningTable>>;

    async fn order_by_id(&self, id: &str) -> RepoResult<Option<Order>>;

    async fn ongoing_order_by_table(&self, table_id: &str) -> RepoResult<Option<Order>>;

    /// Atomically create an ongoing order and claim its table.
    ///
    /// Both writes commit together or not at all. Returns `None` when
    /// the table was not `available` at commit time (lost race or
    /// occupied/closed all along).
    async fn create_dining_order(
        &self,
        table_id: &str,
        employee_id: &str,
    ) -> RepoResult<Option<Order>>;

    /// Atomically append a batch of items to an ongoing order.
    ///
    /// All rows insert or none do. Returns `None` when the order was
    /// not `ongoing` at commit time.
    async fn add_order_items(
        &self,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> RepoResult<Option<Vec<OrderItem>>>;

    async fn order_item(&self, order_id: &str, item_id: i64) -> RepoResult<Option<OrderItem>>;

    async fn items_by_order(&self, order_id: &str) -> RepoResult<Vec<OrderItem>>;

    /// Atomically set one item's status while its owning order is
    /// still ongoing.
    ///
    /// Returns `None` when the order was not `ongoing` at commit time.
    /// An unknown item is an error, not `None`.
    async fn set_order_item_status(
        &self,
        order_id: &str,
        item_id: i64,
        status: OrderItemStatus,
    ) -> RepoResult<Option<()>>;

    /// Atomically move an ongoing order to a terminal status and
    /// release its table.
    ///
    /// Returns `None` when the order was not `ongoing` at commit time.
    async fn close_order(&self, order_id: &str, status: OrderStatus)
    -> RepoResult<Option<Order>>;
}

/// SQLite-backed store
///
/// Atomic units run inside one transaction; the table claim is a
/// single conditional UPDATE, so the availability race is resolved by
/// the database, never by read-then-write.
#[derive(Clone)]
pub struct SqliteDiningStore {
    pool: SqlitePool,
    tables: DiningTableRepository,
    orders: OrderRepository,
    items: OrderItemRepository,
}

impl SqliteDiningStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            tables: DiningTableRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            items: OrderItemRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl DiningStore for SqliteDiningStore {
    async fn table_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        self.tables.find_by_id(id).await
    }

    async fn tables_by_status(&self, status: TableStatus) -> RepoResult<Vec<DiningTable>> {
        self.tables.find_by_status(status).await
    }

    async fn order_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        self.orders.find_by_id(id).await
    }

    async fn ongoing_order_by_table(&self, table_id: &str) -> RepoResult<Option<Order>> {
        self.orders.find_ongoing_by_table(table_id).await
    }

    async fn create_dining_order(
        &self,
        table_id: &str,
        employee_id: &str,
    ) -> RepoResult<Option<Order>> {
        let mut tx = self.pool.begin().await?;

        // Claim first: the conditional write takes the write lock and
        // settles the race before the order row exists.
        if !DiningTableRepository::try_occupy(&mut tx, table_id).await? {
            tx.rollback().await?;
            return Ok(None);
        }

        let order = OrderRepository::insert(&mut tx, table_id, employee_id).await?;

        tx.commit().await?;
        Ok(Some(order))
    }

    async fn add_order_items(
        &self,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> RepoResult<Option<Vec<OrderItem>>> {
        let mut tx = self.pool.begin().await?;

        // Re-check the owning order inside the transaction so a close
        // racing this call cannot strand items on a terminal order.
        match OrderRepository::status_in_tx(&mut tx, order_id).await? {
            Some(OrderStatus::Ongoing) => {}
            _ => {
                tx.rollback().await?;
                return Ok(None);
            }
        }

        let inserted = OrderItemRepository::insert_bulk(&mut tx, order_id, items).await?;

        tx.commit().await?;
        Ok(Some(inserted))
    }

    async fn order_item(&self, order_id: &str, item_id: i64) -> RepoResult<Option<OrderItem>> {
        self.items.find_by_id(order_id, item_id).await
    }

    async fn items_by_order(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        self.items.find_by_order(order_id).await
    }

    async fn set_order_item_status(
        &self,
        order_id: &str,
        item_id: i64,
        status: OrderItemStatus,
    ) -> RepoResult<Option<()>> {
        let mut tx = self.pool.begin().await?;

        // Same re-check as the bulk insert: a close that commits after
        // the orchestrator's read must freeze the item, not lose to it.
        match OrderRepository::status_in_tx(&mut tx, order_id).await? {
            Some(OrderStatus::Ongoing) => {}
            _ => {
                tx.rollback().await?;
                return Ok(None);
            }
        }

        OrderItemRepository::set_status(&mut tx, order_id, item_id, status).await?;

        tx.commit().await?;
        Ok(Some(()))
    }

    async fn close_order(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let mut tx = self.pool.begin().await?;

        if !OrderRepository::try_close(&mut tx, order_id, status).await? {
            tx.rollback().await?;
            return Ok(None);
        }

        let order = sqlx::query_as::<_, Order>(
            "SELECT id, order_type, table_id, employee_id, status, created_at, completed_at \
             FROM orders WHERE id = ?",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        DiningTableRepository::release(&mut tx, &order.table_id)
            .await
            .map_err(|e| RepoError::Database(format!("table release failed: {e}")))?;

        tx.commit().await?;
        Ok(Some(order))
    }
}
