//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`menu`] - 菜单接口
//! - [`tables`] - 桌台接口
//! - [`orders`] - 订单生命周期接口

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod tables;

use axum::Router;

use crate::core::AppState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// 装配全部路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(tables::router())
        .merge(orders::router())
        .with_state(state)
}
