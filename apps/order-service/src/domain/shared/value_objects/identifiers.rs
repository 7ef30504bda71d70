//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up order IDs, usernames and asset symbols, which are
//! all plain strings on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    OrderId,
    "Structured order identifier (`ord_<unique>[_<username>]`)."
);
define_id!(Username, "Login name of the user owning an order or balance.");
define_id!(
    AssetId,
    "Short alphanumeric symbol of a tradeable asset (e.g. `BTC`)."
);

impl OrderId {
    /// Wrap an existing order ID string without checking its format.
    ///
    /// Use `parse_order_id` when the value comes from a client.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Username {
    /// Create a username. Usernames are case-sensitive and stored as given.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AssetId {
    /// Create an asset ID.
    ///
    /// The symbol is normalized to uppercase and trimmed.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_uppercase())
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
