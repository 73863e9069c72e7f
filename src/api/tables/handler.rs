//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::AppState;
use crate::db::models::{DiningTable, TableStatus};
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct TableListQuery {
    /// 筛选状态，缺省为 available (点单前的常见查询)
    pub status: Option<TableStatus>,
}

/// GET /api/tables?status= - 按状态列出桌台
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TableListQuery>,
) -> AppResult<Json<AppResponse<Vec<DiningTable>>>> {
    let status = query.status.unwrap_or(TableStatus::Available);
    let tables = state.dining.tables_by_status(status).await?;
    Ok(ok(tables))
}
