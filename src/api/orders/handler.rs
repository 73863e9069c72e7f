//! Order Lifecycle API Handlers
//!
//! 薄层：解析请求、角色上下文和菜单存在性检查，其余交给
//! [`DiningService`](crate::dining::DiningService)。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::models::{NewOrderItem, Order, OrderItem, OrderItemStatus, OrderStatus};
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 32))]
    pub table_id: String,
}

/// POST /api/orders - 开台下单
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<Order>>)> {
    req.validate()?;

    let order = state.dining.create_order(&req.table_id, &user.id).await?;
    Ok((StatusCode::CREATED, ok(order)))
}

/// GET /api/orders/:id - 订单详情 (含全部菜品)
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let (order, items) = state.dining.order_with_items(&order_id).await?;
    Ok(ok(OrderDetail { order, items }))
}

#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<NewOrderItem>,
}

/// POST /api/orders/:id/items - 向订单追加菜品
pub async fn add_items(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(req): Json<AddItemsRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<Vec<OrderItem>>>)> {
    // 菜单存在性在边界检查，核心服务只关心订单状态
    for item in &req.items {
        if !state.menu.exists(item.menu_item_id).await? {
            return Err(AppError::not_found(format!(
                "Menu item {} not found",
                item.menu_item_id
            )));
        }
    }

    let inserted = state.dining.add_items_to_order(&order_id, &req.items).await?;
    Ok((StatusCode::CREATED, ok(inserted)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemStatusRequest {
    pub status: OrderItemStatus,
}

#[derive(Debug, Serialize)]
pub struct UpdateItemStatusResponse {
    pub order_id: String,
    pub item_id: i64,
    pub status: OrderItemStatus,
}

/// PATCH /api/orders/:id/items/:item_id - 更新菜品状态
pub async fn update_item_status(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(String, i64)>,
    Json(req): Json<UpdateItemStatusRequest>,
) -> AppResult<Json<AppResponse<UpdateItemStatusResponse>>> {
    state
        .dining
        .update_order_item_status(&order_id, item_id, req.status)
        .await?;

    Ok(ok(UpdateItemStatusResponse {
        order_id,
        item_id,
        status: req.status,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CloseOrderRequest {
    pub status: OrderStatus,
}

/// POST /api/orders/:id/close - 结单并释放桌台
pub async fn close(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(req): Json<CloseOrderRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.dining.close_order(&order_id, req.status).await?;
    Ok(ok(order))
}
