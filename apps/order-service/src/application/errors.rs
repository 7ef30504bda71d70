//! Order service error taxonomy.
//!
//! Every use case and business validator returns [`OrderServiceError`].
//! Infrastructure details never reach the message: they are logged and
//! replaced by a generic text.

use std::fmt;

use rust_decimal::Decimal;

use crate::application::ports::{LookupError, TransactionError};
use crate::domain::order_management::{OrderError, TransitionError};
use crate::domain::shared::DomainError;

/// Message returned for every infrastructure failure.
pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable";

/// Coarse error class, used by callers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input or a broken business rule.
    Validation,
    /// Referenced entity does not exist.
    NotFound,
    /// Actor is not allowed to perform the action.
    Permission,
    /// Infrastructure failure.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Permission => write!(f, "permission"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Error returned by the order service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderServiceError {
    /// Invalid input or broken business rule.
    #[error("{0}")]
    Validation(String),

    /// A BUY order costs more than the user's balance.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Order cost.
        required: Decimal,
        /// Current balance.
        available: Decimal,
    },

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (`User`, `Asset`, `Order`).
        entity: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// Actor may not perform the action.
    #[error("{0}")]
    PermissionDenied(String),

    /// Infrastructure failure, details already logged.
    #[error("{0}")]
    Internal(String),
}

impl OrderServiceError {
    /// Shorthand for [`OrderServiceError::Validation`].
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for [`OrderServiceError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Log an infrastructure failure and hide it behind the generic message.
    #[must_use]
    pub fn unavailable(operation: &str, error: &dyn std::error::Error) -> Self {
        tracing::error!(operation, error = %error, "Infrastructure failure");
        Self::Internal(SERVICE_UNAVAILABLE.to_string())
    }

    /// Error class.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::InsufficientBalance { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::PermissionDenied(_) => ErrorCategory::Permission,
            Self::Internal(_) => ErrorCategory::Internal,
        }
    }
}

impl From<TransitionError> for OrderServiceError {
    fn from(err: TransitionError) -> Self {
        if err.is_permission() {
            Self::PermissionDenied(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}

impl From<OrderError> for OrderServiceError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Transition(transition) => transition.into(),
            OrderError::RuleViolations(_) | OrderError::StatusConflict { .. } => {
                Self::Validation(err.to_string())
            }
            OrderError::NotFound { order_id } => Self::not_found("Order", order_id),
            OrderError::DuplicateOrderId { .. } | OrderError::Persistence { .. } => {
                Self::unavailable("order_repository", &err)
            }
        }
    }
}

impl From<DomainError> for OrderServiceError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.message().to_string())
    }
}

impl From<TransactionError> for OrderServiceError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::InsufficientBalance {
                required,
                available,
            } => Self::InsufficientBalance {
                required,
                available,
            },
            TransactionError::LockAcquisition { .. } | TransactionError::DatabaseOperation { .. } => {
                Self::unavailable("transaction_manager", &err)
            }
        }
    }
}

impl From<LookupError> for OrderServiceError {
    fn from(err: LookupError) -> Self {
        Self::unavailable("lookup", &err)
    }
}
