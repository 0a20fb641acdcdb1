use crate::model::{NewOrderItem, OrderItem};
use crate::store::{OrderItemRepository, StoreError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SqlOrderItemRepository {
    pool: SqlitePool,
}

impl SqlOrderItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderItemRepository for SqlOrderItemRepository {
    #[instrument(skip(self))]
    async fn create(&self, item: NewOrderItem) -> Result<OrderItem, StoreError> {
        let created = sqlx::query_as::<_, OrderItem>(
            "INSERT INTO order_items (order_id, menu_item_id, quantity) VALUES (?, ?, ?)
             RETURNING id, order_id, menu_item_id, quantity",
        )
        .bind(item.order_id)
        .bind(item.menu_item_id)
        .bind(item.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "order item"))?;

        debug!(order_item_id = created.id, "Created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_by_order(&self, order_id: i64) -> Result<Vec<OrderItem>, StoreError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, menu_item_id, quantity FROM order_items
             WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
