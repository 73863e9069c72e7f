//! Mesa - 餐厅桌台与订单协调服务
//!
//! # 架构概述
//!
//! 单体 HTTP 服务，核心是 dining 模块：它保证桌台占用状态与订单
//! 生命周期在并发请求下永不发散。
//!
//! - **核心编排** (`dining`): DiningStore + DiningService，跨账本原子写
//! - **数据库** (`db`): SQLite 连接池、迁移、各实体仓库
//! - **认证** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓库)
//! ├── dining/        # 订单生命周期编排
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod dining;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{AppState, Config, Server};
pub use dining::{DiningError, DiningService, SqliteDiningStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 安全事件日志 (固定 target 便于过滤)
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ____ ___  ___  _________ _
  / __ `__ \/ _ \/ ___/ __ `/
 / / / / / /  __(__  ) /_/ /
/_/ /_/ /_/\___/____/\__,_/
    "#
    );
}
