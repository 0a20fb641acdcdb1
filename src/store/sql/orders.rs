use crate::model::{NewOrder, Order};
use crate::store::{OrderRepository, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SqlOrderRepository {
    pool: SqlitePool,
}

impl SqlOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for SqlOrderRepository {
    #[instrument(skip(self))]
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let created = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (user_id, created_at, total_amount) VALUES (?, ?, ?)
             RETURNING id, user_id, created_at, total_amount",
        )
        .bind(order.user_id)
        .bind(Utc::now())
        .bind(order.total_amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "order"))?;

        debug!(order_id = created.id, "Created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: i64) -> Result<Order, StoreError> {
        sqlx::query_as::<_, Order>(
            "SELECT id, user_id, created_at, total_amount FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "order"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "order"))?;

        debug!(rows = result.rows_affected(), "Deleted");
        Ok(())
    }
}
