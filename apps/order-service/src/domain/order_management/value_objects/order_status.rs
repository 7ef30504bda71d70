//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
///
/// Orders start in `Pending`. `Completed`, `Cancelled`, `Failed` and
/// `Expired` are terminal. Which moves are legal is decided by
/// [`OrderStatusManager`](crate::domain::order_management::services::OrderStatusManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order accepted by the service, not yet confirmed.
    Pending,
    /// Order confirmed and ready for processing.
    Confirmed,
    /// Order waiting in the limit-order queue for its price.
    Queued,
    /// Order is being executed.
    Processing,
    /// Order executed.
    Completed,
    /// Order cancelled by the user or the system.
    Cancelled,
    /// Order failed during execution.
    Failed,
    /// Order expired before it could execute.
    Expired,
}

impl OrderStatus {
    /// All statuses, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Confirmed,
        Self::Queued,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
        Self::Failed,
        Self::Expired,
    ];

    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Cancelled | Self::Failed | Self::Expired
        )
    }

    /// Returns true if the order is still active (not terminal).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Wire name, e.g. `PROCESSING`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Queued => "QUEUED",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
