//! Order Lifecycle API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::patch, routing::post};

use crate::auth::require_role;
use crate::core::AppState;
use crate::db::models::Role;

/// 开台、加菜、结单由服务员发起
const WAITER: &[Role] = &[Role::Waiter];
/// 菜品状态由服务员和后厨共同推进
const SERVICE_STAFF: &[Role] = &[Role::Waiter, Role::Kitchen];

pub fn router() -> Router<AppState> {
    // 任何已登录员工都可以查看订单详情
    let read_routes = Router::new().route("/api/orders/{id}", get(handler::get_by_id));

    let waiter_routes = Router::new()
        .route("/api/orders", post(handler::create))
        .route("/api/orders/{id}/items", post(handler::add_items))
        .route("/api/orders/{id}/close", post(handler::close))
        .layer(middleware::from_fn(require_role(WAITER)));

    let item_status_routes = Router::new()
        .route(
            "/api/orders/{id}/items/{item_id}",
            patch(handler::update_item_status),
        )
        .layer(middleware::from_fn(require_role(SERVICE_STAFF)));

    read_routes.merge(waiter_routes).merge(item_status_routes)
}
