//! Transaction Manager Port (Driven Port)
//!
//! Applies a balance change and persists the order as one atomic unit.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::accounts::Balance;
use crate::domain::order_management::Order;

/// Result of an order placed together with its balance update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTransaction {
    /// Persisted order.
    pub order: Order,
    /// Balance after the update.
    pub balance: Balance,
}

/// Transaction manager error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// Not enough funds at commit time.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the order needs.
        required: Decimal,
        /// Amount on the balance.
        available: Decimal,
    },

    /// Balance lock could not be acquired in time.
    #[error("Failed to acquire lock: {message}")]
    LockAcquisition {
        /// Error details.
        message: String,
    },

    /// Underlying storage failed.
    #[error("Database operation failed: {message}")]
    DatabaseOperation {
        /// Error details.
        message: String,
    },
}

/// Port for atomic order + balance updates.
#[async_trait]
pub trait TransactionManagerPort: Send + Sync {
    /// Debit `order.total_amount()` from the owner and persist the order.
    async fn create_buy_order_with_balance_update(
        &self,
        order: &Order,
    ) -> Result<OrderTransaction, TransactionError>;

    /// Credit `order.total_amount()` to the owner and persist the order.
    async fn create_sell_order_with_balance_update(
        &self,
        order: &Order,
    ) -> Result<OrderTransaction, TransactionError>;
}
