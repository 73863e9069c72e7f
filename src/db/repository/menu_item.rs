//! Menu Item Repository
//!
//! Catalog storage plus the read-only Menu Lookup the dining core
//! consumes.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate};
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            "SELECT id, name, description, price, requires_ticket, created_at \
             FROM menu_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(item)
    }

    /// Whether an item exists (Menu Lookup collaborator)
    pub async fn exists(&self, id: i64) -> RepoResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items WHERE id = ?")
            .bind(id)
            .fetch_one(self.base.pool())
            .await?;
        Ok(count > 0)
    }

    /// Paginated name search; `search` is matched as a substring.
    pub async fn find_page(
        &self,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<MenuItem>> {
        let pattern = format!("%{search}%");
        let items = sqlx::query_as::<_, MenuItem>(
            "SELECT id, name, description, price, requires_ticket, created_at \
             FROM menu_items WHERE name LIKE ? ORDER BY name LIMIT ? OFFSET ?",
        )
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.base.pool())
        .await?;
        Ok(items)
    }

    /// Total matches for pagination metadata
    pub async fn count(&self, search: &str) -> RepoResult<i64> {
        let pattern = format!("%{search}%");
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items WHERE name LIKE ?")
            .bind(&pattern)
            .fetch_one(self.base.pool())
            .await?;
        Ok(count)
    }

    /// Create a new menu item (name is unique)
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let created_at = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO menu_items (name, description, price, requires_ticket, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.requires_ticket)
        .bind(created_at)
        .fetch_one(self.base.pool())
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                data.name
            )),
            other => other,
        })?;

        Ok(MenuItem {
            id,
            name: data.name,
            description: data.description,
            price: data.price,
            requires_ticket: data.requires_ticket,
            created_at,
        })
    }
}
