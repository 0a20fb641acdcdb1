use crate::model::{MenuItem, NewMenuItem};
use crate::store::{MenuItemRepository, StoreError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SqlMenuItemRepository {
    pool: SqlitePool,
}

impl SqlMenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuItemRepository for SqlMenuItemRepository {
    #[instrument(skip(self))]
    async fn create(&self, item: NewMenuItem) -> Result<MenuItem, StoreError> {
        let created = sqlx::query_as::<_, MenuItem>(
            "INSERT INTO menu_items (name, price, description) VALUES (?, ?, ?)
             RETURNING id, name, price, description",
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "menu item"))?;

        debug!(menu_item_id = created.id, "Created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "menu item"))?;

        debug!(rows = result.rows_affected(), "Deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn price(&self, id: i64) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT price FROM menu_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound("menu item"))
    }
}
