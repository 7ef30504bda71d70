//! Application Ports (Driven)
//!
//! Ports define how the application uses external systems: lookups of
//! users, assets and balances, and the transaction manager that commits an
//! order together with its balance change.

mod lookup_ports;
mod transaction_manager_port;

pub use lookup_ports::{AssetRepositoryPort, BalanceRepositoryPort, LookupError, UserRepositoryPort};
pub use transaction_manager_port::{OrderTransaction, TransactionError, TransactionManagerPort};
