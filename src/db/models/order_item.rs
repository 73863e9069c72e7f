//! Order Item Model

use serde::{Deserialize, Serialize};

/// Per-item preparation status
///
/// The five active statuses may be reassigned in any direction while
/// the owning order is ongoing (the kitchen does revert statuses);
/// `cancelled` is terminal. Items are never deleted - cancellation is
/// a status, not a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderItemStatus {
    Pending,
    Preparing,
    Ready,
    Served,
    Delivered,
    Cancelled,
}

/// Order line item
///
/// `id` is only unique within the owning order; the composite
/// `(order_id, id)` is the real identity.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub order_id: String,
    pub id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub notes: String,
    pub status: OrderItemStatus,
}

/// Input for the bulk item insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub menu_item_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub notes: String,
}
