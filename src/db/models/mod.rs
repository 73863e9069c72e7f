//! Database Models
//!
//! Entity structs and status enums backing the SQLite schema.

pub mod dining_table;
pub mod employee;
pub mod menu_item;
pub mod order;
pub mod order_item;

// Re-exports
pub use dining_table::{DiningTable, TableStatus};
pub use employee::{Employee, Role};
pub use menu_item::{MenuItem, MenuItemCreate};
pub use order::{Order, OrderStatus, OrderType};
pub use order_item::{NewOrderItem, OrderItem, OrderItemStatus};
