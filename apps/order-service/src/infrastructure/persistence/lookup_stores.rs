//! In-memory user and asset stores.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{AssetRepositoryPort, LookupError, UserRepositoryPort};
use crate::domain::accounts::User;
use crate::domain::assets::Asset;
use crate::domain::shared::AssetId;

/// In-memory implementation of `UserRepositoryPort`.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `users`.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.username.to_string(), u))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// Insert or replace a user.
    pub async fn upsert(&self, user: User) {
        self.users
            .write()
            .await
            .insert(user.username.to_string(), user);
    }
}

#[async_trait]
impl UserRepositoryPort for InMemoryUserStore {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, LookupError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

/// In-memory implementation of `AssetRepositoryPort`.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    assets: RwLock<HashMap<AssetId, Asset>>,
}

impl InMemoryAssetStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `assets`.
    #[must_use]
    pub fn with_assets(assets: impl IntoIterator<Item = Asset>) -> Self {
        let assets = assets
            .into_iter()
            .map(|a| (a.asset_id.clone(), a))
            .collect();
        Self {
            assets: RwLock::new(assets),
        }
    }

    /// Insert or replace an asset.
    pub async fn upsert(&self, asset: Asset) {
        self.assets
            .write()
            .await
            .insert(asset.asset_id.clone(), asset);
    }
}

#[async_trait]
impl AssetRepositoryPort for InMemoryAssetStore {
    async fn get_asset_by_id(&self, asset_id: &AssetId) -> Result<Option<Asset>, LookupError> {
        Ok(self.assets.read().await.get(asset_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn user_store_lookup() {
        let store = InMemoryUserStore::with_users([User::customer("alice")]);
        assert!(store.get_user_by_username("alice").await.unwrap().is_some());
        assert!(store.get_user_by_username("Alice").await.unwrap().is_none());

        store.upsert(User::customer("alice").deactivated()).await;
        let alice = store.get_user_by_username("alice").await.unwrap().unwrap();
        assert!(!alice.is_active);
    }

    #[tokio::test]
    async fn asset_store_lookup_is_case_insensitive() {
        let store = InMemoryAssetStore::with_assets([Asset::new("BTC", "Bitcoin", dec!(45000))]);
        let btc = store.get_asset_by_id(&AssetId::new("btc")).await.unwrap();
        assert_eq!(btc.map(|a| a.price), Some(dec!(45000)));

        store.upsert(Asset::new("ETH", "Ether", dec!(3000))).await;
        assert!(store.get_asset_by_id(&AssetId::new("ETH")).await.unwrap().is_some());
    }
}
