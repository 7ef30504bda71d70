//! In-memory transaction manager.
//!
//! Holds user balances and commits an order together with its balance
//! change under a single lock. The lock is acquired with a timeout so a
//! stuck writer surfaces as [`TransactionError::LockAcquisition`] instead of
//! a hang.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, MutexGuard};

use super::InMemoryOrderRepository;
use crate::application::ports::{
    BalanceRepositoryPort, LookupError, OrderTransaction, TransactionError, TransactionManagerPort,
};
use crate::domain::accounts::Balance;
use crate::domain::order_management::{Order, OrderError};

/// Default time to wait for the balance lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory implementation of `TransactionManagerPort` and
/// `BalanceRepositoryPort`.
#[derive(Debug)]
pub struct InMemoryTransactionManager {
    balances: Mutex<HashMap<String, Balance>>,
    orders: Arc<InMemoryOrderRepository>,
    lock_timeout: Duration,
}

impl InMemoryTransactionManager {
    /// Create a manager persisting orders into `orders`.
    #[must_use]
    pub fn new(orders: Arc<InMemoryOrderRepository>, lock_timeout: Duration) -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            orders,
            lock_timeout,
        }
    }

    /// Set a user's balance.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::LockAcquisition`] if the lock times out.
    pub async fn set_balance(
        &self,
        username: &str,
        amount: Decimal,
    ) -> Result<(), TransactionError> {
        let mut balances = self.lock().await?;
        balances.insert(username.to_string(), Balance::new(username, amount));
        Ok(())
    }

    async fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Balance>>, TransactionError> {
        tokio::time::timeout(self.lock_timeout, self.balances.lock())
            .await
            .map_err(|_| TransactionError::LockAcquisition {
                message: format!(
                    "balance lock not acquired within {}ms",
                    self.lock_timeout.as_millis()
                ),
            })
    }

    async fn persist(&self, order: &Order) -> Result<(), TransactionError> {
        self.orders.insert_new(order).await.map_err(|e| match e {
            OrderError::DuplicateOrderId { order_id } => TransactionError::DatabaseOperation {
                message: format!("order {order_id} already exists"),
            },
            other => TransactionError::DatabaseOperation {
                message: other.to_string(),
            },
        })
    }
}

#[async_trait]
impl TransactionManagerPort for InMemoryTransactionManager {
    async fn create_buy_order_with_balance_update(
        &self,
        order: &Order,
    ) -> Result<OrderTransaction, TransactionError> {
        let mut balances = self.lock().await?;
        let username = order.username().as_str();
        let required = order.total_amount();

        let mut balance = balances
            .get(username)
            .cloned()
            .unwrap_or_else(|| Balance::new(username, Decimal::ZERO));

        if !balance.covers(required) {
            return Err(TransactionError::InsufficientBalance {
                required,
                available: balance.current_balance,
            });
        }
        balance
            .debit(required)
            .map_err(|e| TransactionError::DatabaseOperation {
                message: e.to_string(),
            })?;

        self.persist(order).await?;
        balances.insert(username.to_string(), balance.clone());

        tracing::debug!(
            order_id = %order.order_id(),
            username,
            debited = %required,
            balance = %balance.current_balance,
            "Buy order committed"
        );

        Ok(OrderTransaction {
            order: order.clone(),
            balance,
        })
    }

    async fn create_sell_order_with_balance_update(
        &self,
        order: &Order,
    ) -> Result<OrderTransaction, TransactionError> {
        let mut balances = self.lock().await?;
        let username = order.username().as_str();
        let proceeds = order.total_amount();

        let mut balance = balances
            .get(username)
            .cloned()
            .unwrap_or_else(|| Balance::new(username, Decimal::ZERO));
        balance
            .credit(proceeds)
            .map_err(|e| TransactionError::DatabaseOperation {
                message: e.to_string(),
            })?;

        self.persist(order).await?;
        balances.insert(username.to_string(), balance.clone());

        tracing::debug!(
            order_id = %order.order_id(),
            username,
            credited = %proceeds,
            balance = %balance.current_balance,
            "Sell order committed"
        );

        Ok(OrderTransaction {
            order: order.clone(),
            balance,
        })
    }
}

#[async_trait]
impl BalanceRepositoryPort for InMemoryTransactionManager {
    async fn get_balance(&self, username: &str) -> Result<Option<Balance>, LookupError> {
        let balances = self.lock().await.map_err(|e| LookupError::Unavailable {
            message: e.to_string(),
        })?;
        Ok(balances.get(username).cloned())
    }
}
