//! Service identity, transaction and listing settings.

use serde::{Deserialize, Serialize};

/// Service identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name attached to log output.
    #[serde(default = "default_service_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

/// Transaction manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsConfig {
    /// How long to wait for the balance lock, in milliseconds.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for TransactionsConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Order listing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Page size used when a listing names no limit (1..=100).
    #[serde(default = "default_list_limit")]
    pub default_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_list_limit(),
        }
    }
}

fn default_service_name() -> String {
    "order-service".to_string()
}

const fn default_lock_timeout_ms() -> u64 {
    5000
}

const fn default_list_limit() -> usize {
    50
}
