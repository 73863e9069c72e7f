//! Dining Service (orchestrator)
//!
//! The only component allowed to mutate table occupancy or order
//! lifecycle state. Every operation checks its preconditions against
//! a fresh read, then commits all resulting writes through one of the
//! store's atomic units. Precondition reads are advisory - for the
//! writes that can race (table claim, order close, item append) the
//! store's conditional write is the authority, and a lost race comes
//! back as the same typed failure a stale precondition would have
//! produced.

use std::sync::Arc;

use tracing::info;

use crate::db::models::{
    DiningTable, NewOrderItem, Order, OrderItem, OrderItemStatus, OrderStatus, TableStatus,
};
use crate::db::repository::RepoError;
use crate::dining::error::{DiningError, DiningResult};
use crate::dining::store::DiningStore;

/// Per-item preparation notes cap (SQLite TEXT is unbounded)
const MAX_NOTE_LEN: usize = 500;

#[derive(Clone)]
pub struct DiningService {
    store: Arc<dyn DiningStore>,
}

impl DiningService {
    pub fn new(store: Arc<dyn DiningStore>) -> Self {
        Self { store }
    }

    /// Open a new dining order on an available table.
    ///
    /// The order insert and the table's `available -> occupied`
    /// transition commit as one unit; at most one of two concurrent
    /// calls on the same table can succeed.
    pub async fn create_order(&self, table_id: &str, employee_id: &str) -> DiningResult<Order> {
        if table_id.trim().is_empty() {
            return Err(DiningError::Validation("table_id must not be empty".into()));
        }
        if employee_id.trim().is_empty() {
            return Err(DiningError::Validation(
                "employee_id must not be empty".into(),
            ));
        }

        let table = self
            .store
            .table_by_id(table_id)
            .await?
            .ok_or_else(|| DiningError::UnknownTable(table_id.to_string()))?;

        if table.status != TableStatus::Available {
            return Err(DiningError::TableNotAvailable(table_id.to_string()));
        }

        match self.store.create_dining_order(table_id, employee_id).await? {
            Some(order) => {
                info!(
                    order_id = %order.id,
                    table_id = %table_id,
                    employee_id = %employee_id,
                    "Order created, table occupied"
                );
                Ok(order)
            }
            // Lost the race between the read above and the claim.
            None => Err(DiningError::TableNotAvailable(table_id.to_string())),
        }
    }

    /// Append a batch of items to an ongoing order.
    ///
    /// The batch is validated before any store access and inserts
    /// all-or-nothing; partial insertion is never observable.
    pub async fn add_items_to_order(
        &self,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> DiningResult<Vec<OrderItem>> {
        if items.is_empty() {
            return Err(DiningError::Validation("items must not be empty".into()));
        }
        for (idx, item) in items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(DiningError::Validation(format!(
                    "items[{idx}]: quantity must be positive, got {}",
                    item.quantity
                )));
            }
            if item.notes.len() > MAX_NOTE_LEN {
                return Err(DiningError::Validation(format!(
                    "items[{idx}]: notes too long (max {MAX_NOTE_LEN})"
                )));
            }
        }

        let order = self
            .store
            .order_by_id(order_id)
            .await?
            .ok_or_else(|| DiningError::UnknownOrder(order_id.to_string()))?;

        if order.status != OrderStatus::Ongoing {
            return Err(DiningError::OrderNotOngoing(order_id.to_string()));
        }

        match self.store.add_order_items(order_id, items).await? {
            Some(inserted) => {
                info!(
                    order_id = %order_id,
                    item_count = inserted.len(),
                    "Items added to order"
                );
                Ok(inserted)
            }
            None => Err(DiningError::OrderNotOngoing(order_id.to_string())),
        }
    }

    /// Update one item's preparation status.
    ///
    /// Any reassignment among the active statuses is allowed while
    /// the owning order is ongoing; there is deliberately no
    /// assembly-line ordering.
    pub async fn update_order_item_status(
        &self,
        order_id: &str,
        item_id: i64,
        status: OrderItemStatus,
    ) -> DiningResult<()> {
        let order = self
            .store
            .order_by_id(order_id)
            .await?
            .ok_or_else(|| DiningError::UnknownOrder(order_id.to_string()))?;

        if order.status != OrderStatus::Ongoing {
            return Err(DiningError::OrderNotOngoing(order_id.to_string()));
        }

        // Scoped lookup: an item id under a different order must read
        // as absent, not as someone else's item.
        self.store
            .order_item(order_id, item_id)
            .await?
            .ok_or(DiningError::UnknownOrderItem {
                order_id: order_id.to_string(),
                item_id,
            })?;

        match self.store.set_order_item_status(order_id, item_id, status).await {
            Ok(Some(())) => {}
            // Order closed between the read above and the write.
            Ok(None) => return Err(DiningError::OrderNotOngoing(order_id.to_string())),
            Err(RepoError::NotFound(_)) => {
                return Err(DiningError::UnknownOrderItem {
                    order_id: order_id.to_string(),
                    item_id,
                });
            }
            Err(other) => return Err(other.into()),
        }

        info!(
            order_id = %order_id,
            item_id = item_id,
            status = ?status,
            "Order item status updated"
        );
        Ok(())
    }

    /// List tables by occupancy status. Pure read, no invariant work.
    pub async fn tables_by_status(&self, status: TableStatus) -> DiningResult<Vec<DiningTable>> {
        Ok(self.store.tables_by_status(status).await?)
    }

    /// Fetch an order with its items, in item-id order.
    pub async fn order_with_items(
        &self,
        order_id: &str,
    ) -> DiningResult<(Order, Vec<OrderItem>)> {
        let order = self
            .store
            .order_by_id(order_id)
            .await?
            .ok_or_else(|| DiningError::UnknownOrder(order_id.to_string()))?;
        let items = self.store.items_by_order(order_id).await?;
        Ok((order, items))
    }

    /// Close an ongoing order with a terminal status and release its
    /// table back to `available`, atomically.
    pub async fn close_order(
        &self,
        order_id: &str,
        final_status: OrderStatus,
    ) -> DiningResult<Order> {
        if !final_status.is_terminal() {
            return Err(DiningError::Validation(format!(
                "final status must be completed or cancelled, got {final_status:?}"
            )));
        }

        let order = self
            .store
            .order_by_id(order_id)
            .await?
            .ok_or_else(|| DiningError::UnknownOrder(order_id.to_string()))?;

        if order.status != OrderStatus::Ongoing {
            return Err(DiningError::OrderNotOngoing(order_id.to_string()));
        }

        match self.store.close_order(order_id, final_status).await? {
            Some(closed) => {
                info!(
                    order_id = %order_id,
                    table_id = %closed.table_id,
                    status = ?final_status,
                    "Order closed, table released"
                );
                Ok(closed)
            }
            None => Err(DiningError::OrderNotOngoing(order_id.to_string())),
        }
    }
}
