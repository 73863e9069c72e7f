//! End-to-end dining flow tests against a real SQLite database.
//!
//! Every mutation is followed by an occupancy/lifecycle consistency
//! check: a table is occupied exactly when it has one ongoing order.

use std::sync::Arc;

use sqlx::SqlitePool;
use tempfile::TempDir;

use mesa::db::DbService;
use mesa::db::models::{
    NewOrderItem, OrderItemStatus, OrderStatus, Role, TableStatus,
};
use mesa::db::repository::EmployeeRepository;
use mesa::dining::{DiningError, DiningService, DiningStore, SqliteDiningStore};

struct TestEnv {
    // Held for the lifetime of the test, deletes the db on drop
    _dir: TempDir,
    pool: SqlitePool,
    service: DiningService,
    employee_id: String,
}

async fn setup() -> TestEnv {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("database init");
    let pool = db.pool.clone();

    let employees = EmployeeRepository::new(pool.clone());
    let waiter = employees
        .create("waiter1", "not-a-real-hash", Role::Waiter)
        .await
        .expect("seed waiter");

    let service = DiningService::new(Arc::new(SqliteDiningStore::new(pool.clone())));

    TestEnv {
        _dir: dir,
        pool,
        service,
        employee_id: waiter.id,
    }
}

/// Occupied tables and ongoing orders must mirror each other exactly.
async fn assert_occupancy_consistent(pool: &SqlitePool) {
    let orphan_tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM dining_tables t \
         WHERE t.status = 'occupied' \
         AND (SELECT COUNT(*) FROM orders o WHERE o.table_id = t.id AND o.status = 'ongoing') != 1",
    )
    .fetch_one(pool)
    .await
    .expect("orphan table query");
    assert_eq!(orphan_tables, 0, "occupied table without exactly one ongoing order");

    let orphan_orders: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders o \
         JOIN dining_tables t ON t.id = o.table_id \
         WHERE o.status = 'ongoing' AND t.status != 'occupied'",
    )
    .fetch_one(pool)
    .await
    .expect("orphan order query");
    assert_eq!(orphan_orders, 0, "ongoing order on a non-occupied table");
}

async fn seed_menu_item(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO menu_items (name, price, requires_ticket, created_at) \
         VALUES (?, 9.5, 0, datetime('now')) RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("seed menu item")
}

fn item(menu_item_id: i64, quantity: i64) -> NewOrderItem {
    NewOrderItem {
        menu_item_id,
        quantity,
        notes: String::new(),
    }
}

#[tokio::test]
async fn full_dining_round_trip() {
    let env = setup().await;
    let dish = seed_menu_item(&env.pool, "Paella").await;
    let drink = seed_menu_item(&env.pool, "Sangria").await;

    // Open the table
    let order = env
        .service
        .create_order("A1", &env.employee_id)
        .await
        .expect("create order");
    assert_eq!(order.status, OrderStatus::Ongoing);
    assert!(order.completed_at.is_none());
    assert_occupancy_consistent(&env.pool).await;

    // A1 no longer shows as available
    let available = env
        .service
        .tables_by_status(TableStatus::Available)
        .await
        .expect("list tables");
    assert!(available.iter().all(|t| t.id != "A1"));

    // Add two items, both start pending with per-order ids
    let items = env
        .service
        .add_items_to_order(&order.id, &[item(dish, 2), item(drink, 5)])
        .await
        .expect("add items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 1);
    assert_eq!(items[1].id, 2);
    assert!(items.iter().all(|i| i.status == OrderItemStatus::Pending));
    assert_occupancy_consistent(&env.pool).await;

    // Kitchen advances one item, the sibling is untouched
    env.service
        .update_order_item_status(&order.id, 1, OrderItemStatus::Served)
        .await
        .expect("update item status");

    let statuses: Vec<String> =
        sqlx::query_scalar("SELECT status FROM order_items WHERE order_id = ? ORDER BY id")
            .bind(&order.id)
            .fetch_all(&env.pool)
            .await
            .expect("read item statuses");
    assert_eq!(statuses, vec!["served", "pending"]);

    // Close the order, table comes back
    let closed = env
        .service
        .close_order(&order.id, OrderStatus::Completed)
        .await
        .expect("close order");
    assert_eq!(closed.status, OrderStatus::Completed);
    assert!(closed.completed_at.is_some());
    assert_occupancy_consistent(&env.pool).await;

    let available = env
        .service
        .tables_by_status(TableStatus::Available)
        .await
        .expect("list tables");
    assert!(available.iter().any(|t| t.id == "A1"));
}

#[tokio::test]
async fn create_order_on_unknown_table_fails() {
    let env = setup().await;
    let result = env.service.create_order("Z9", &env.employee_id).await;
    assert!(matches!(result, Err(DiningError::UnknownTable(_))));
    assert_occupancy_consistent(&env.pool).await;
}

#[tokio::test]
async fn occupied_table_rejects_second_order_without_writes() {
    let env = setup().await;
    env.service
        .create_order("A2", &env.employee_id)
        .await
        .expect("first order");

    let result = env.service.create_order("A2", &env.employee_id).await;
    assert!(matches!(result, Err(DiningError::TableNotAvailable(_))));

    // Exactly one order exists for the table
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE table_id = 'A2'")
        .fetch_one(&env.pool)
        .await
        .expect("order count");
    assert_eq!(count, 1);
    assert_occupancy_consistent(&env.pool).await;
}

#[tokio::test]
async fn concurrent_create_admits_exactly_one() {
    let env = setup().await;

    let svc1 = env.service.clone();
    let svc2 = env.service.clone();
    let emp = env.employee_id.clone();
    let emp2 = env.employee_id.clone();

    let (r1, r2) = tokio::join!(
        tokio::spawn(async move { svc1.create_order("B1", &emp).await }),
        tokio::spawn(async move { svc2.create_order("B1", &emp2).await }),
    );
    let r1 = r1.expect("task 1");
    let r2 = r2.expect("task 2");

    let winners = [&r1, &r2].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one concurrent claim must win");

    for r in [r1, r2] {
        if let Err(e) = r {
            assert!(
                matches!(e, DiningError::TableNotAvailable(_) | DiningError::Store(_)),
                "loser failed with unexpected error: {e}"
            );
        }
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE table_id = 'B1'")
        .fetch_one(&env.pool)
        .await
        .expect("order count");
    assert_eq!(count, 1);
    assert_occupancy_consistent(&env.pool).await;
}

#[tokio::test]
async fn closed_order_rejects_new_items() {
    let env = setup().await;
    let dish = seed_menu_item(&env.pool, "Tortilla").await;

    let order = env
        .service
        .create_order("A3", &env.employee_id)
        .await
        .expect("create order");
    env.service
        .close_order(&order.id, OrderStatus::Cancelled)
        .await
        .expect("close order");

    let result = env.service.add_items_to_order(&order.id, &[item(dish, 1)]).await;
    assert!(matches!(result, Err(DiningError::OrderNotOngoing(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = ?")
        .bind(&order.id)
        .fetch_one(&env.pool)
        .await
        .expect("item count");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn bad_quantity_rejects_whole_batch() {
    let env = setup().await;
    let dish = seed_menu_item(&env.pool, "Gazpacho").await;

    let order = env
        .service
        .create_order("A4", &env.employee_id)
        .await
        .expect("create order");

    let batch = [item(dish, 2), item(dish, 0), item(dish, 3)];
    let result = env.service.add_items_to_order(&order.id, &batch).await;
    assert!(matches!(result, Err(DiningError::Validation(_))));

    // All-or-nothing: the valid rows must not have landed either
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = ?")
        .bind(&order.id)
        .fetch_one(&env.pool)
        .await
        .expect("item count");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn item_lookup_is_scoped_to_its_order() {
    let env = setup().await;
    let dish = seed_menu_item(&env.pool, "Croquetas").await;

    let first = env
        .service
        .create_order("B2", &env.employee_id)
        .await
        .expect("first order");
    let second = env
        .service
        .create_order("B3", &env.employee_id)
        .await
        .expect("second order");

    env.service
        .add_items_to_order(&first.id, &[item(dish, 1)])
        .await
        .expect("add item");

    // Item 1 belongs to the first order only
    let result = env
        .service
        .update_order_item_status(&second.id, 1, OrderItemStatus::Ready)
        .await;
    assert!(matches!(
        result,
        Err(DiningError::UnknownOrderItem { item_id: 1, .. })
    ));
}

#[tokio::test]
async fn item_status_write_loses_to_a_committed_close() {
    let env = setup().await;
    let dish = seed_menu_item(&env.pool, "Churros").await;

    let order = env
        .service
        .create_order("A1", &env.employee_id)
        .await
        .expect("create order");
    env.service
        .add_items_to_order(&order.id, &[item(dish, 1)])
        .await
        .expect("add item");
    env.service
        .close_order(&order.id, OrderStatus::Completed)
        .await
        .expect("close order");

    // Drive the store directly: this is the write a request holds
    // after its precondition read, with the close already committed.
    // The transactional re-check must refuse it.
    let store = SqliteDiningStore::new(env.pool.clone());
    let outcome = store
        .set_order_item_status(&order.id, 1, OrderItemStatus::Served)
        .await
        .expect("store call");
    assert!(outcome.is_none(), "item write must lose to the committed close");

    let status: String =
        sqlx::query_scalar("SELECT status FROM order_items WHERE order_id = ? AND id = 1")
            .bind(&order.id)
            .fetch_one(&env.pool)
            .await
            .expect("read item status");
    assert_eq!(status, "pending", "closed order's item must stay frozen");
}

#[tokio::test]
async fn order_detail_lists_items_in_id_order() {
    let env = setup().await;
    let dish = seed_menu_item(&env.pool, "Pulpo").await;
    let drink = seed_menu_item(&env.pool, "Vermut").await;

    let order = env
        .service
        .create_order("A2", &env.employee_id)
        .await
        .expect("create order");
    env.service
        .add_items_to_order(&order.id, &[item(dish, 1)])
        .await
        .expect("first batch");
    env.service
        .add_items_to_order(&order.id, &[item(drink, 2)])
        .await
        .expect("second batch");

    let (fetched, items) = env
        .service
        .order_with_items(&order.id)
        .await
        .expect("order detail");
    assert_eq!(fetched.id, order.id);
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(items[1].quantity, 2);
}

#[tokio::test]
async fn double_close_conflicts() {
    let env = setup().await;

    let order = env
        .service
        .create_order("B4", &env.employee_id)
        .await
        .expect("create order");
    env.service
        .close_order(&order.id, OrderStatus::Completed)
        .await
        .expect("first close");

    let result = env.service.close_order(&order.id, OrderStatus::Cancelled).await;
    assert!(matches!(result, Err(DiningError::OrderNotOngoing(_))));
    assert_occupancy_consistent(&env.pool).await;
}

#[tokio::test]
async fn table_can_be_reopened_after_close() {
    let env = setup().await;

    let first = env
        .service
        .create_order("A1", &env.employee_id)
        .await
        .expect("first order");
    env.service
        .close_order(&first.id, OrderStatus::Completed)
        .await
        .expect("close first");

    // Fresh ongoing order on the same table
    let second = env
        .service
        .create_order("A1", &env.employee_id)
        .await
        .expect("reopen table");
    assert_ne!(first.id, second.id);

    // Item ids restart per order
    let dish = seed_menu_item(&env.pool, "Flan").await;
    let items = env
        .service
        .add_items_to_order(&second.id, &[item(dish, 1)])
        .await
        .expect("add item");
    assert_eq!(items[0].id, 1);
    assert_occupancy_consistent(&env.pool).await;
}
