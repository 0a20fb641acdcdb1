//! # Scripted Faults
//!
//! Utilities for exercising failure paths against a real database.
//!
//! A [`FaultScript`] is a queue of outcomes. Each call to a scripted method pops the next
//! outcome: [`Outcome::Pass`] forwards to the wrapped repository, [`Outcome::Fail`] returns
//! a storage error without touching it. Once the queue is empty every call passes through.
//!
//! ```rust,ignore
//! let items = FaultScript::new().pass().fail("disk full");
//! let store = Store::new(pool.clone())
//!     .with_order_items(ScriptedOrderItems::new(SqlOrderItemRepository::new(pool), items.clone()));
//!
//! // first order line is inserted, the second one fails
//! items.verify();
//! ```

use crate::model::{NewOrder, NewOrderItem, Order, OrderItem};
use crate::store::{OrderItemRepository, OrderRepository, StoreError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// What a scripted call does.
#[derive(Debug, Clone)]
pub enum Outcome {
    Pass,
    Fail(String),
}

/// A shared queue of [`Outcome`]s. Clones share the queue.
#[derive(Debug, Clone, Default)]
pub struct FaultScript {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
}

impl FaultScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the next call through.
    pub fn pass(self) -> Self {
        self.push(Outcome::Pass)
    }

    /// Fails the next call with `message`.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Outcome::Fail(message.into()))
    }

    fn push(self, outcome: Outcome) -> Self {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(outcome);
        self
    }

    fn next(&self) -> Outcome {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or(Outcome::Pass)
    }

    /// Number of outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Panics unless every scripted outcome was consumed.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all scripted outcomes were consumed. {} remaining", remaining);
        }
    }

    fn check(&self, operation: &'static str) -> Result<(), StoreError> {
        match self.next() {
            Outcome::Pass => Ok(()),
            Outcome::Fail(message) => {
                warn!(operation, %message, "Injected fault");
                Err(StoreError::Database(sqlx::Error::Protocol(message)))
            }
        }
    }
}

/// Order repository whose `delete` follows a [`FaultScript`].
pub struct ScriptedOrders<R> {
    inner: R,
    deletes: FaultScript,
}

impl<R: OrderRepository> ScriptedOrders<R> {
    pub fn new(inner: R, deletes: FaultScript) -> Self {
        Self { inner, deletes }
    }
}

#[async_trait]
impl<R: OrderRepository> OrderRepository for ScriptedOrders<R> {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        self.inner.create(order).await
    }

    async fn find(&self, id: i64) -> Result<Order, StoreError> {
        self.inner.find(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.deletes.check("order.delete")?;
        self.inner.delete(id).await
    }
}

/// Order item repository whose `create` follows a [`FaultScript`].
pub struct ScriptedOrderItems<R> {
    inner: R,
    creates: FaultScript,
}

impl<R: OrderItemRepository> ScriptedOrderItems<R> {
    pub fn new(inner: R, creates: FaultScript) -> Self {
        Self { inner, creates }
    }
}

#[async_trait]
impl<R: OrderItemRepository> OrderItemRepository for ScriptedOrderItems<R> {
    async fn create(&self, item: NewOrderItem) -> Result<OrderItem, StoreError> {
        self.creates.check("order_item.create")?;
        self.inner.create(item).await
    }

    async fn find_by_order(&self, order_id: i64) -> Result<Vec<OrderItem>, StoreError> {
        self.inner.find_by_order(order_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_runs_in_order_then_passes() {
        let script = FaultScript::new().pass().fail("boom");

        assert!(script.check("op").is_ok());
        let err = script.check("op").unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert!(script.check("op").is_ok());
        script.verify();
    }

    #[test]
    #[should_panic(expected = "1 remaining")]
    fn verify_panics_on_unused_outcomes() {
        let script = FaultScript::new().fail("never reached");
        script.verify();
    }
}
