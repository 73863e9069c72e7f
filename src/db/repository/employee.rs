//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Employee, Role};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find employee by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Employee>> {
        let emp = sqlx::query_as::<_, Employee>(
            "SELECT id, username, password, role, created_at FROM employees WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(emp)
    }

    /// Create a new employee (password already hashed)
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> RepoResult<Employee> {
        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO employees (id, username, password, role, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&employee.id)
        .bind(&employee.username)
        .bind(&employee.password)
        .bind(employee.role)
        .bind(employee.created_at)
        .execute(self.base.pool())
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => {
                RepoError::Duplicate(format!("Username '{}' already exists", username))
            }
            other => other,
        })?;

        Ok(employee)
    }

    /// Count all employees
    pub async fn count(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(self.base.pool())
            .await?;
        Ok(count)
    }
}
