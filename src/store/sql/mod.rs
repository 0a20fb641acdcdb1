//! SQLite-backed repositories.
//!
//! Each repository holds a clone of the same [`SqlitePool`]; the pool is the only shared
//! state. Schema lives in `migrations/` and is embedded into the binary.

mod menu_items;
mod order_items;
mod orders;
mod users;

pub use menu_items::SqlMenuItemRepository;
pub use order_items::SqlOrderItemRepository;
pub use orders::SqlOrderRepository;
pub use users::SqlUserRepository;

use crate::store::StoreError;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{info, warn};

pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Opens a pool for `url` and runs pending migrations.
///
/// An in-memory database exists per connection, so `:memory:` URLs get a single connection
/// that is never recycled.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = url.contains(":memory:");
    let pool_options = if in_memory {
        if max_connections > 1 {
            warn!(max_connections, "In-memory database, using a single connection");
        }
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    info!(url, in_memory, "Database ready");

    Ok(pool)
}
