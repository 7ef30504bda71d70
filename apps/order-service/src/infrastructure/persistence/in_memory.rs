//! In-memory order repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order_management::{Order, OrderError, OrderRepository, OrderStatus};
use crate::domain::shared::{OrderId, Username};

/// In-memory implementation of `OrderRepository`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of orders in the repository.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Check if the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    /// Add an order to the repository (for test setup).
    pub async fn add(&self, order: Order) {
        self.orders
            .write()
            .await
            .insert(order.order_id().to_string(), order);
    }

    /// Insert a new order, rejecting an ID that is already stored.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::DuplicateOrderId`] if the ID is taken.
    pub async fn insert_new(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().await;
        let key = order.order_id().to_string();
        if orders.contains_key(&key) {
            return Err(OrderError::DuplicateOrderId { order_id: key });
        }
        orders.insert(key, order.clone());
        Ok(())
    }
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.order_id().as_str().cmp(a.order_id().as_str()))
    });
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        self.orders
            .write()
            .await
            .insert(order.order_id().to_string(), order.clone());
        Ok(())
    }

    async fn save_if_status(
        &self,
        order: &Order,
        expected: OrderStatus,
    ) -> Result<(), OrderError> {
        let mut orders = self.orders.write().await;
        let key = order.order_id().to_string();
        let Some(stored) = orders.get_mut(&key) else {
            return Err(OrderError::NotFound { order_id: key });
        };
        if stored.status() != expected {
            return Err(OrderError::StatusConflict {
                order_id: key,
                expected,
                found: stored.status(),
            });
        }
        *stored = order.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.orders.read().await.get(id.as_str()).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
        status: Option<OrderStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>, OrderError> {
        let mut found: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.username() == username)
            .filter(|o| status.is_none_or(|s| o.status() == s))
            .cloned()
            .collect();

        newest_first(&mut found);
        if let Some(limit) = limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let mut found: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.status() == status)
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }

    async fn exists(&self, id: &OrderId) -> Result<bool, OrderError> {
        Ok(self.orders.read().await.contains_key(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_management::{OrderType, ReconstitutedOrderParams};
    use crate::domain::shared::AssetId;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn order(id: &str, username: &str, status: OrderStatus, age_secs: i64) -> Order {
        let created = Utc::now() - Duration::seconds(age_secs);
        Order::reconstitute(ReconstitutedOrderParams {
            order_id: OrderId::new(id),
            username: Username::new(username),
            order_type: OrderType::MarketBuy,
            asset_id: AssetId::new("BTC"),
            quantity: dec!(1),
            order_price: None,
            total_amount: dec!(45000),
            status,
            expires_at: None,
            created_at: created,
            updated_at: created,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_find_by_id() {
        let repo = InMemoryOrderRepository::new();
        let o = order("ord_1_a_alice", "alice", OrderStatus::Pending, 0);

        repo.save(&o).await.unwrap();

        let found = repo.find_by_id(o.order_id()).await.unwrap();
        assert_eq!(found, Some(o));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn save_overwrites() {
        let repo = InMemoryOrderRepository::new();
        let mut o = order("ord_1_a_alice", "alice", OrderStatus::Pending, 0);
        repo.save(&o).await.unwrap();

        o.transition_to(OrderStatus::Confirmed, None, true).unwrap();
        repo.save(&o).await.unwrap();

        let found = repo.find_by_id(o.order_id()).await.unwrap().unwrap();
        assert_eq!(found.status(), OrderStatus::Confirmed);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn save_if_status_applies_when_status_unchanged() {
        let repo = InMemoryOrderRepository::new();
        let mut o = order("ord_1_a_alice", "alice", OrderStatus::Pending, 0);
        repo.add(o.clone()).await;

        o.transition_to(OrderStatus::Cancelled, Some("alice"), false)
            .unwrap();
        repo.save_if_status(&o, OrderStatus::Pending).await.unwrap();

        let found = repo.find_by_id(o.order_id()).await.unwrap().unwrap();
        assert_eq!(found.status(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn save_if_status_keeps_newer_terminal_status() {
        let repo = InMemoryOrderRepository::new();
        let pending = order("ord_1_a_alice", "alice", OrderStatus::Pending, 0);
        repo.add(pending.clone()).await;

        // System completes the order after the cancel was checked.
        let mut completed = pending.clone();
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Completed,
        ] {
            completed.transition_to(status, None, true).unwrap();
        }
        repo.save(&completed).await.unwrap();

        let mut cancelled = pending;
        cancelled
            .transition_to(OrderStatus::Cancelled, Some("alice"), false)
            .unwrap();
        let err = repo
            .save_if_status(&cancelled, OrderStatus::Pending)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            OrderError::StatusConflict {
                order_id: "ord_1_a_alice".to_string(),
                expected: OrderStatus::Pending,
                found: OrderStatus::Completed,
            }
        );
        let found = repo.find_by_id(cancelled.order_id()).await.unwrap().unwrap();
        assert_eq!(found.status(), OrderStatus::Completed);
    }

    #[tokio::test]
    async fn save_if_status_of_missing_order() {
        let repo = InMemoryOrderRepository::new();
        let o = order("ord_1_a_alice", "alice", OrderStatus::Pending, 0);

        let err = repo
            .save_if_status(&o, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound { .. }));
    }

    #[tokio::test]
    async fn find_by_username_newest_first_with_filters() {
        let repo = InMemoryOrderRepository::new();
        repo.add(order("ord_1_a_alice", "alice", OrderStatus::Pending, 30)).await;
        repo.add(order("ord_1_b_alice", "alice", OrderStatus::Cancelled, 20)).await;
        repo.add(order("ord_1_c_alice", "alice", OrderStatus::Pending, 10)).await;
        repo.add(order("ord_1_d_bob", "bob", OrderStatus::Pending, 5)).await;

        let alice = Username::new("alice");
        let all = repo.find_by_username(&alice, None, None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|o| o.order_id().as_str()).collect();
        assert_eq!(ids, ["ord_1_c_alice", "ord_1_b_alice", "ord_1_a_alice"]);

        let pending = repo
            .find_by_username(&alice, Some(OrderStatus::Pending), None)
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);

        let limited = repo.find_by_username(&alice, None, Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].order_id().as_str(), "ord_1_c_alice");
    }

    #[tokio::test]
    async fn find_by_status() {
        let repo = InMemoryOrderRepository::new();
        repo.add(order("ord_1_a_alice", "alice", OrderStatus::Queued, 0)).await;
        repo.add(order("ord_1_b_bob", "bob", OrderStatus::Pending, 0)).await;

        let queued = repo.find_by_status(OrderStatus::Queued).await.unwrap();
        assert_eq!(queued.len(), 1);
    }

    #[tokio::test]
    async fn insert_new_rejects_duplicates() {
        let repo = InMemoryOrderRepository::new();
        let o = order("ord_1_a_alice", "alice", OrderStatus::Pending, 0);

        repo.insert_new(&o).await.unwrap();
        let err = repo.insert_new(&o).await.unwrap_err();
        assert!(matches!(err, OrderError::DuplicateOrderId { .. }));
        assert!(repo.exists(o.order_id()).await.unwrap());
    }

    #[tokio::test]
    async fn empty_repository() {
        let repo = InMemoryOrderRepository::new();
        assert!(repo.is_empty().await);
        assert!(!repo.exists(&OrderId::new("ord_1_x")).await.unwrap());
    }
}
