//! Order Status Manager
//!
//! Sole authority on which status changes are legal, and for whom.

use std::collections::HashSet;

use crate::domain::order_management::errors::TransitionError;
use crate::domain::order_management::value_objects::OrderStatus;

/// Order status state machine.
///
/// ```text
/// PENDING    -> CONFIRMED | CANCELLED | FAILED
/// CONFIRMED  -> PROCESSING | CANCELLED | FAILED
/// QUEUED     -> PROCESSING | EXPIRED | CANCELLED
/// PROCESSING -> COMPLETED | FAILED
/// COMPLETED, CANCELLED, FAILED, EXPIRED: terminal
/// ```
pub struct OrderStatusManager;

impl OrderStatusManager {
    /// Allowed targets for a status. Empty for terminal statuses.
    const fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
        match from {
            OrderStatus::Pending => &[
                OrderStatus::Confirmed,
                OrderStatus::Cancelled,
                OrderStatus::Failed,
            ],
            OrderStatus::Confirmed => &[
                OrderStatus::Processing,
                OrderStatus::Cancelled,
                OrderStatus::Failed,
            ],
            OrderStatus::Queued => &[
                OrderStatus::Processing,
                OrderStatus::Expired,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Processing => &[OrderStatus::Completed, OrderStatus::Failed],
            OrderStatus::Completed
            | OrderStatus::Cancelled
            | OrderStatus::Failed
            | OrderStatus::Expired => &[],
        }
    }

    /// Check whether `from -> to` is an edge of the transition table.
    #[must_use]
    pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
        Self::allowed_targets(from).contains(&to)
    }

    /// All statuses reachable in one step from `from`.
    #[must_use]
    pub fn valid_transitions(from: OrderStatus) -> HashSet<OrderStatus> {
        Self::allowed_targets(from).iter().copied().collect()
    }

    /// Returns true if no transition leaves `status`.
    #[must_use]
    pub const fn is_terminal_status(status: OrderStatus) -> bool {
        status.is_terminal()
    }

    /// Returns true for every non-terminal status.
    #[must_use]
    pub const fn is_active_status(status: OrderStatus) -> bool {
        status.is_active()
    }

    /// Returns true if a user may still cancel an order in `status`.
    ///
    /// QUEUED orders can be cancelled, but only by the system.
    #[must_use]
    pub fn can_user_cancel(status: OrderStatus) -> bool {
        matches!(status, OrderStatus::Pending | OrderStatus::Confirmed)
            && Self::can_transition(status, OrderStatus::Cancelled)
    }

    /// Authorize a status change.
    ///
    /// `username` is set for user-initiated requests; `is_system` marks
    /// requests coming from internal processing. The table check runs first,
    /// so a pair outside the table always reports `InvalidTransition`, even
    /// when it would also break an actor rule.
    ///
    /// # Errors
    ///
    /// Returns the first rule the request breaks.
    pub fn validate_transition(
        from: OrderStatus,
        to: OrderStatus,
        username: Option<&str>,
        is_system: bool,
    ) -> Result<(), TransitionError> {
        if !Self::can_transition(from, to) {
            return Err(TransitionError::InvalidTransition { from, to });
        }

        if to == OrderStatus::Failed && !is_system {
            return Err(TransitionError::SystemOnly { to });
        }

        if to == OrderStatus::Expired && !is_system {
            return Err(TransitionError::SystemOnly { to });
        }

        if to == OrderStatus::Cancelled && username.is_some() && !Self::can_user_cancel(from) {
            return Err(TransitionError::CancellationNotAllowed { from });
        }

        Ok(())
    }
}
