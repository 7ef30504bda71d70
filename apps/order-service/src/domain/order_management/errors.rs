//! Order management errors.
//!
//! Message texts are part of the contract: clients and tests match on them.

use std::fmt;

use super::value_objects::OrderStatus;

/// Rejected status transition, as decided by the order status manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The pair is not an edge of the transition table.
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// Only the system may move an order into this status (FAILED, EXPIRED).
    SystemOnly {
        /// Requested status.
        to: OrderStatus,
    },

    /// A user asked to cancel an order that is past user control.
    CancellationNotAllowed {
        /// Current status.
        from: OrderStatus,
    },
}

impl TransitionError {
    /// Returns true when the failure is about the actor, not the table.
    #[must_use]
    pub const fn is_permission(&self) -> bool {
        matches!(
            self,
            Self::SystemOnly { .. } | Self::CancellationNotAllowed { .. }
        )
    }
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "Invalid transition from {from} to {to}")
            }
            Self::SystemOnly { to: OrderStatus::Failed } => {
                write!(f, "Only system can mark orders as failed")
            }
            Self::SystemOnly { to: OrderStatus::Expired } => {
                write!(f, "Only system can mark orders as expired")
            }
            Self::SystemOnly { to } => {
                write!(f, "Only system can mark orders as {}", to.as_str().to_lowercase())
            }
            Self::CancellationNotAllowed { from } => {
                write!(f, "Order cannot be cancelled by user in {from} status")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// A single failed business rule.
///
/// `Display` yields only the message so that callers can surface it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    /// Field the rule applies to (`quantity`, `order_price`, `expires_at`, ...).
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl RuleViolation {
    /// Create a violation for a field.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuleViolation {}

/// Errors raised by the order aggregate and its repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Status change rejected by the status manager.
    Transition(TransitionError),

    /// One or more business rules failed while building an order.
    RuleViolations(Vec<RuleViolation>),

    /// Order not found.
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Duplicate order ID.
    DuplicateOrderId {
        /// Order ID.
        order_id: String,
    },

    /// The stored order left the status the change was checked against.
    StatusConflict {
        /// Order ID.
        order_id: String,
        /// Status the change was validated from.
        expected: OrderStatus,
        /// Status found in storage.
        found: OrderStatus,
    },

    /// Storage backend failed.
    Persistence {
        /// Error details (never shown to clients).
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transition(err) => write!(f, "{err}"),
            Self::RuleViolations(violations) => {
                let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
                write!(f, "{}", messages.join("; "))
            }
            Self::NotFound { order_id } => {
                write!(f, "Order not found: {order_id}")
            }
            Self::DuplicateOrderId { order_id } => {
                write!(f, "Duplicate order ID: {order_id}")
            }
            Self::StatusConflict {
                order_id,
                expected,
                found,
            } => {
                write!(f, "Order {order_id} is no longer {expected} (now {found})")
            }
            Self::Persistence { message } => {
                write!(f, "Order persistence failed: {message}")
            }
        }
    }
}

impl std::error::Error for OrderError {}

impl From<TransitionError> for OrderError {
    fn from(err: TransitionError) -> Self {
        Self::Transition(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message() {
        let err = TransitionError::InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Pending,
        };
        assert_eq!(err.to_string(), "Invalid transition from COMPLETED to PENDING");
        assert!(!err.is_permission());
    }

    #[test]
    fn system_only_messages() {
        let failed = TransitionError::SystemOnly {
            to: OrderStatus::Failed,
        };
        let expired = TransitionError::SystemOnly {
            to: OrderStatus::Expired,
        };
        assert_eq!(failed.to_string(), "Only system can mark orders as failed");
        assert_eq!(expired.to_string(), "Only system can mark orders as expired");
        assert!(failed.is_permission());
    }

    #[test]
    fn cancellation_not_allowed_message() {
        let err = TransitionError::CancellationNotAllowed {
            from: OrderStatus::Queued,
        };
        assert!(err.to_string().contains("cannot be cancelled"));
        assert!(err.to_string().contains("QUEUED"));
    }

    #[test]
    fn status_conflict_message() {
        let err = OrderError::StatusConflict {
            order_id: "ord_1_a_alice".to_string(),
            expected: OrderStatus::Pending,
            found: OrderStatus::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Order ord_1_a_alice is no longer PENDING (now COMPLETED)"
        );
    }

    #[test]
    fn rule_violations_join_messages() {
        let err = OrderError::RuleViolations(vec![
            RuleViolation::new("quantity", "Quantity must be at least 0.001"),
            RuleViolation::new("order_price", "Price cannot have more than 2 decimal places"),
        ]);
        assert_eq!(
            err.to_string(),
            "Quantity must be at least 0.001; Price cannot have more than 2 decimal places"
        );
    }

    #[test]
    fn order_error_not_found_display() {
        let err = OrderError::NotFound {
            order_id: "ord_1_abc".to_string(),
        };
        assert!(err.to_string().contains("ord_1_abc"));
    }

    #[test]
    fn order_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(OrderError::Persistence {
            message: "disk full".to_string(),
        });
        assert!(!err.to_string().is_empty());
    }
}
