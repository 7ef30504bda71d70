//! User entity and role.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::Username;

/// Role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular trading customer. Acts only on their own orders.
    #[default]
    Customer,
    /// Administrator. May act on any user's orders.
    Admin,
}

impl UserRole {
    /// Parse a stored role string, case-insensitively.
    ///
    /// Anything that is not `admin` (unknown, empty, legacy values) resolves
    /// to [`UserRole::Customer`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "customer" => Self::Customer,
            _ => Self::default(),
        }
    }

    /// Lowercase role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform user, as seen by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub username: Username,
    /// Role.
    pub role: UserRole,
    /// Inactive users cannot trade.
    pub is_active: bool,
}

impl User {
    /// Create an active customer.
    #[must_use]
    pub fn customer(username: impl Into<String>) -> Self {
        Self {
            username: Username::new(username),
            role: UserRole::Customer,
            is_active: true,
        }
    }

    /// Create an active admin.
    #[must_use]
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: Username::new(username),
            role: UserRole::Admin,
            is_active: true,
        }
    }

    /// Return the same user marked inactive.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns true for admins.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
