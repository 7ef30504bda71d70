//! User fiat balance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Username};

/// Fiat (USD) balance of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Owner.
    pub username: Username,
    /// Available funds.
    pub current_balance: Decimal,
    /// Last change.
    pub updated_at: DateTime<Utc>,
}

impl Balance {
    /// Create a balance stamped now.
    #[must_use]
    pub fn new(username: impl Into<String>, current_balance: Decimal) -> Self {
        Self {
            username: Username::new(username),
            current_balance,
            updated_at: Utc::now(),
        }
    }

    /// Returns true if at least `amount` is available.
    #[must_use]
    pub fn covers(&self, amount: Decimal) -> bool {
        self.current_balance >= amount
    }

    /// Remove `amount` from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] if `amount` is negative or larger
    /// than the balance.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), DomainError> {
        if amount.is_sign_negative() {
            return Err(DomainError::invalid("amount", "Debit amount cannot be negative"));
        }
        if !self.covers(amount) {
            return Err(DomainError::invalid(
                "current_balance",
                format!(
                    "Insufficient balance: required {amount}, available {}",
                    self.current_balance
                ),
            ));
        }
        self.current_balance -= amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Add `amount` to the balance.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] if `amount` is negative.
    pub fn credit(&mut self, amount: Decimal) -> Result<(), DomainError> {
        if amount.is_sign_negative() {
            return Err(DomainError::invalid("amount", "Credit amount cannot be negative"));
        }
        self.current_balance += amount;
        self.updated_at = Utc::now();
        Ok(())
    }
}
