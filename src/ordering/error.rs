//! Error types for the order workflow.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while placing or reading an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request itself is malformed (mismatched arrays, bad quantity, overflow).
    #[error("{0}")]
    Validation(String),

    /// A referenced menu item does not exist.
    #[error("menu item {0} does not exist")]
    UnknownMenuItem(i64),

    /// The order does not exist or belongs to someone else.
    #[error("order {0} not found")]
    NotFound(i64),

    /// A store operation failed and nothing was left behind.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An order line failed and the order could not be deleted afterwards.
    /// The order row is left without (all of) its items.
    #[error("order {order_id} could not be rolled back: {source}")]
    Compensation {
        order_id: i64,
        #[source]
        source: StoreError,
    },
}
