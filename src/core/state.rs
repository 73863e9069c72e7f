//! 共享应用状态
//!
//! 聚合连接池、JWT 服务和领域服务，供所有 HTTP 处理器使用。

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, password};
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::Role;
use crate::db::repository::{EmployeeRepository, MenuItemRepository};
use crate::dining::{DiningService, SqliteDiningStore};

/// 应用状态 (clone 共享，内部都是 Arc/池)
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub dining: DiningService,
    pub employees: EmployeeRepository,
    pub menu: MenuItemRepository,
}

impl AppState {
    /// 初始化状态：打开数据库、跑迁移、装配服务、引导管理员
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let pool = db.pool.clone();

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let dining = DiningService::new(Arc::new(SqliteDiningStore::new(pool.clone())));
        let employees = EmployeeRepository::new(pool.clone());
        let menu = MenuItemRepository::new(pool.clone());

        let state = Self {
            config: config.clone(),
            pool,
            jwt_service,
            dining,
            employees,
            menu,
        };

        state.ensure_default_admin().await?;

        Ok(state)
    }

    /// 员工表为空时创建引导管理员
    ///
    /// 密码来自 DEFAULT_ADMIN_PASSWORD，生产环境务必覆盖默认值。
    async fn ensure_default_admin(&self) -> anyhow::Result<()> {
        if self.employees.count().await? > 0 {
            return Ok(());
        }

        let hash = password::hash_password(&self.config.default_admin_password)?;
        let admin = self.employees.create("admin", &hash, Role::Admin).await?;
        tracing::warn!(
            employee_id = %admin.id,
            "No employees found, bootstrap admin account 'admin' created"
        );
        if self.config.is_production() {
            tracing::warn!("Change the bootstrap admin password immediately");
        }

        Ok(())
    }
}
