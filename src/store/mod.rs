//! # Store
//!
//! Persistence for users, menu items, orders and order items.
//!
//! ## Structure
//!
//! - [`repository`] - one trait per entity ([`UserRepository`], [`MenuItemRepository`], ...)
//! - [`sql`] - SQLite implementations built on `sqlx`, plus pool setup and migrations
//! - [`mock`] - scripted fault injection for tests
//! - [`Store`] - the aggregate that owns one instance of each repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! let store = Store::connect("sqlite::memory:", 1).await?;
//! let user = store.user().find_by_email("alice@example.com").await?;
//! let price = store.menu_item().price(3).await?;
//! ```

pub mod error;
pub mod mock;
pub mod repository;
pub mod sql;

pub use error::*;
pub use repository::*;

use sql::{SqlMenuItemRepository, SqlOrderItemRepository, SqlOrderRepository, SqlUserRepository};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

/// Access to every repository over one shared connection pool.
///
/// All repositories are built up front in [`Store::new`], so the accessors never construct
/// anything and return the same instance on every call. Cloning a `Store` is cheap and the
/// clones share those instances.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    users: Arc<dyn UserRepository>,
    menu_items: Arc<dyn MenuItemRepository>,
    orders: Arc<dyn OrderRepository>,
    order_items: Arc<dyn OrderItemRepository>,
}

impl Store {
    /// Builds the SQL repositories over `pool`.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: Arc::new(SqlUserRepository::new(pool.clone())),
            menu_items: Arc::new(SqlMenuItemRepository::new(pool.clone())),
            orders: Arc::new(SqlOrderRepository::new(pool.clone())),
            order_items: Arc::new(SqlOrderItemRepository::new(pool.clone())),
            pool,
        }
    }

    /// Opens the database at `url`, applies migrations and builds the store.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = sql::connect(url, max_connections).await?;
        Ok(Self::new(pool))
    }

    pub fn user(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    pub fn menu_item(&self) -> &dyn MenuItemRepository {
        self.menu_items.as_ref()
    }

    pub fn order(&self) -> &dyn OrderRepository {
        self.orders.as_ref()
    }

    pub fn order_item(&self) -> &dyn OrderItemRepository {
        self.order_items.as_ref()
    }

    /// Replaces the order repository, e.g. with a [`mock::ScriptedOrders`].
    pub fn with_orders(mut self, orders: impl OrderRepository + 'static) -> Self {
        self.orders = Arc::new(orders);
        self
    }

    /// Replaces the order item repository, e.g. with a [`mock::ScriptedOrderItems`].
    pub fn with_order_items(mut self, order_items: impl OrderItemRepository + 'static) -> Self {
        self.order_items = Arc::new(order_items);
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool. Outstanding clones fail on their next query.
    pub async fn close(&self) {
        info!("Closing store");
        self.pool.close().await;
    }
}
