use chrono::{DateTime, Utc};
use serde::Serialize;

/// A placed order. `total_amount` is the sum of `price × quantity` over its items,
/// fixed at creation time.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub total_amount: i64,
}

/// Payload for creating an order. The store stamps `created_at`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub total_amount: i64,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// Payload for creating an order line.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
}
