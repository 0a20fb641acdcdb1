//! # Order Workflow
//!
//! Placing an order is the one multi-step write in the system:
//!
//! 1. validate the request (parallel arrays of equal, non-zero length; positive quantities)
//! 2. look up every price and compute the total
//! 3. insert the order
//! 4. insert one order item per line
//! 5. if any item insert fails, delete the order again
//!
//! The repositories run one statement at a time, so step 5 is a compensating action rather
//! than a rollback. When the compensating delete fails too, the error is
//! [`OrderError::Compensation`] and the dangling order is logged for reconciliation.

pub mod error;

pub use error::*;

use crate::model::{NewOrder, NewOrderItem, Order, OrderItem, User};
use crate::store::{Store, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Body of `POST /private/orders`: `menu_item_id[i]` is ordered `quantity[i]` times.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub menu_item_id: Vec<i64>,
    #[serde(default)]
    pub quantity: Vec<i64>,
}

/// One validated `(menu item, quantity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub menu_item_id: i64,
    pub quantity: i64,
}

impl OrderRequest {
    pub fn new(lines: &[(i64, i64)]) -> Self {
        Self {
            menu_item_id: lines.iter().map(|(id, _)| *id).collect(),
            quantity: lines.iter().map(|(_, quantity)| *quantity).collect(),
        }
    }

    /// Pairs up the two arrays, rejecting anything that is not a well-formed order.
    pub fn lines(&self) -> Result<Vec<OrderLine>, OrderError> {
        if self.menu_item_id.len() != self.quantity.len() {
            return Err(OrderError::Validation(format!(
                "menu_item_id has {} entries but quantity has {}",
                self.menu_item_id.len(),
                self.quantity.len()
            )));
        }
        if self.menu_item_id.is_empty() {
            return Err(OrderError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }

        self.menu_item_id
            .iter()
            .zip(&self.quantity)
            .map(|(&menu_item_id, &quantity)| {
                if quantity <= 0 {
                    return Err(OrderError::Validation(format!(
                        "quantity for menu item {} must be positive",
                        menu_item_id
                    )));
                }
                Ok(OrderLine {
                    menu_item_id,
                    quantity,
                })
            })
            .collect()
    }
}

/// An order together with its lines, as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOrder {
    pub id: i64,
    #[serde(rename = "order_item")]
    pub order_items: Vec<OrderItem>,
    #[serde(rename = "created_At")]
    pub created_at: DateTime<Utc>,
    pub total_price: i64,
}

impl PlacedOrder {
    fn new(order: Order, order_items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            order_items,
            created_at: order.created_at,
            total_price: order.total_amount,
        }
    }
}

/// Places an order for `user`.
#[instrument(skip(store, user, request), fields(user_id = user.id))]
pub async fn place_order(
    store: &Store,
    user: &User,
    request: &OrderRequest,
) -> Result<PlacedOrder, OrderError> {
    let lines = request.lines()?;
    let total_amount = quote(store, &lines).await?;

    let order = store
        .order()
        .create(NewOrder {
            user_id: user.id,
            total_amount,
        })
        .await?;
    debug!(order_id = order.id, total_amount, "Order inserted");

    let mut order_items = Vec::with_capacity(lines.len());
    for line in &lines {
        let created = store
            .order_item()
            .create(NewOrderItem {
                order_id: order.id,
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
            })
            .await;

        match created {
            Ok(item) => order_items.push(item),
            Err(cause) => return Err(compensate(store, order.id, cause).await),
        }
    }

    info!(order_id = order.id, total_amount, items = order_items.len(), "Order placed");
    Ok(PlacedOrder::new(order, order_items))
}

/// Fetches an order owned by `user`. Someone else's order reads as missing.
#[instrument(skip(store, user), fields(user_id = user.id))]
pub async fn find_order(store: &Store, user: &User, order_id: i64) -> Result<PlacedOrder, OrderError> {
    let order = match store.order().find(order_id).await {
        Ok(order) if order.user_id == user.id => order,
        Ok(_) => return Err(OrderError::NotFound(order_id)),
        Err(e) if e.is_not_found() => return Err(OrderError::NotFound(order_id)),
        Err(e) => return Err(e.into()),
    };
    let order_items = store.order_item().find_by_order(order.id).await?;

    Ok(PlacedOrder::new(order, order_items))
}

/// Sum of `price × quantity` over all lines, using current prices.
async fn quote(store: &Store, lines: &[OrderLine]) -> Result<i64, OrderError> {
    let mut total: i64 = 0;
    for line in lines {
        let price = match store.menu_item().price(line.menu_item_id).await {
            Ok(price) => price,
            Err(e) if e.is_not_found() => {
                return Err(OrderError::UnknownMenuItem(line.menu_item_id))
            }
            Err(e) => return Err(e.into()),
        };

        total = price
            .checked_mul(line.quantity)
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or_else(|| OrderError::Validation("order total is too large".to_string()))?;
    }
    Ok(total)
}

/// Deletes a partially written order. Returns the error to report for the failed insert.
async fn compensate(store: &Store, order_id: i64, cause: StoreError) -> OrderError {
    warn!(order_id, error = %cause, "Order item insert failed, deleting order");

    match store.order().delete(order_id).await {
        Ok(()) => {
            info!(order_id, "Order rolled back");
            OrderError::Store(cause)
        }
        Err(source) => {
            error!(
                order_id,
                error = %source,
                cause = %cause,
                reconciliation_candidate = true,
                "Compensating delete failed, order left without its items"
            );
            OrderError::Compensation { order_id, source }
        }
    }
}
