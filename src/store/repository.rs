//! # Repository Traits
//!
//! One narrow trait per entity. The [`Store`](crate::store::Store) hands out trait objects,
//! so the SQL implementations in [`sql`](crate::store::sql) can be wrapped or replaced
//! (see [`mock`](crate::store::mock)) without touching the callers.
//!
//! Every call is a single statement and atomic on its own; nothing here spans a transaction.

use crate::model::{MenuItem, NewMenuItem, NewOrder, NewOrderItem, NewUser, Order, OrderItem, User};
use crate::store::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Validates, hashes the password and inserts. A taken email is a
    /// [`StoreError::Constraint`].
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find(&self, id: i64) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;
}

#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn create(&self, item: NewMenuItem) -> Result<MenuItem, StoreError>;

    /// Removes the item. Deleting an id that does not exist is not an error.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Current price of the item, or [`StoreError::NotFound`] if there is no such item.
    async fn price(&self, id: i64) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order, stamping `created_at` with the current time.
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn find(&self, id: i64) -> Result<Order, StoreError>;

    /// Removes the order together with its items.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait OrderItemRepository: Send + Sync {
    /// Inserts one order line. Fails with [`StoreError::Constraint`] when the order or the
    /// menu item does not exist.
    async fn create(&self, item: NewOrderItem) -> Result<OrderItem, StoreError>;

    /// All lines of an order, in insertion order.
    async fn find_by_order(&self, order_id: i64) -> Result<Vec<OrderItem>, StoreError>;
}
