//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::OrderStatus;
use crate::domain::shared::{OrderId, Username};

/// Repository trait for Order persistence.
///
/// Orders are never deleted, so there is no removal operation.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Store a status change, but only if the stored order is still in
    /// `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::StatusConflict`] when the stored status differs,
    /// [`OrderError::NotFound`] when the order is missing, or an error if
    /// persistence fails.
    async fn save_if_status(&self, order: &Order, expected: OrderStatus)
    -> Result<(), OrderError>;

    /// Find an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Find a user's orders, newest first.
    ///
    /// `status` narrows the result to one status; `limit` caps its length.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_username(
        &self,
        username: &Username,
        status: Option<OrderStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>, OrderError>;

    /// Find all orders with a given status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError>;

    /// Check if an order exists.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn exists(&self, id: &OrderId) -> Result<bool, OrderError>;
}
