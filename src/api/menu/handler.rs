//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppError;
use crate::core::AppState;
use crate::db::models::{MenuItem, MenuItemCreate};
use crate::utils::{AppResponse, AppResult, ok};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct MenuListQuery {
    #[serde(default)]
    pub search: String,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MenuPage {
    pub items: Vec<MenuItem>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// GET /api/menu - 分页列出菜单 (支持名称搜索)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<AppResponse<MenuPage>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;

    let items = state.menu.find_page(&query.search, limit, offset).await?;
    let total = state.menu.count(&query.search).await?;

    Ok(ok(MenuPage {
        items,
        total,
        page,
        limit,
    }))
}

/// GET /api/menu/:id - 获取单个菜单项
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    let item = state
        .menu
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(ok(item))
}

/// POST /api/menu - 创建菜单项 (仅管理员)
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<MenuItem>>)> {
    payload.validate()?;

    let item = state.menu.create(payload).await?;

    tracing::info!(menu_item_id = item.id, name = %item.name, "Menu item created");

    Ok((StatusCode::CREATED, ok(item)))
}
