//! Persistence Adapters
//!
//! In-memory implementations of the repository traits and ports.

pub mod in_memory;
pub mod lookup_stores;
pub mod transaction_manager;

pub use in_memory::InMemoryOrderRepository;
pub use lookup_stores::{InMemoryAssetStore, InMemoryUserStore};
pub use transaction_manager::{DEFAULT_LOCK_TIMEOUT, InMemoryTransactionManager};
