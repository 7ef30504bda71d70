//! Lookup Ports (Driven Ports)
//!
//! Read-only access to the users, assets and balances owned by other
//! services.

use async_trait::async_trait;

use crate::domain::accounts::{Balance, User};
use crate::domain::assets::Asset;
use crate::domain::shared::AssetId;

/// Lookup port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    /// Backing store could not be reached.
    #[error("Lookup backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for user lookups.
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// Find a user by username. `None` if the user does not exist.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, LookupError>;
}

/// Port for asset lookups.
#[async_trait]
pub trait AssetRepositoryPort: Send + Sync {
    /// Find an asset by its symbol. `None` if the asset does not exist.
    async fn get_asset_by_id(&self, asset_id: &AssetId) -> Result<Option<Asset>, LookupError>;
}

/// Port for balance lookups.
#[async_trait]
pub trait BalanceRepositoryPort: Send + Sync {
    /// Get a user's fiat balance. `None` if the user never had one.
    async fn get_balance(&self, username: &str) -> Result<Option<Balance>, LookupError>;
}
