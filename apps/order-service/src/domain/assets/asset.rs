//! Tradeable asset.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::AssetId;

/// Asset category, derived from the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// BTC, ETH.
    Major,
    /// USDT, USDC, DAI.
    Stablecoin,
    /// Everything else.
    #[default]
    Altcoin,
}

impl AssetCategory {
    /// Categorize a symbol. Unknown symbols are altcoins.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "BTC" | "ETH" => Self::Major,
            "USDT" | "USDC" | "DAI" => Self::Stablecoin,
            _ => Self::default(),
        }
    }

    /// Lowercase category name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Stablecoin => "stablecoin",
            Self::Altcoin => "altcoin",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An asset that can be bought or sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Symbol.
    pub asset_id: AssetId,
    /// Display name.
    pub name: String,
    /// Current market price (USD).
    pub price: Decimal,
    /// Inactive assets cannot be traded.
    pub is_active: bool,
    /// Category derived from the symbol.
    pub category: AssetCategory,
}

impl Asset {
    /// Create an active asset; the category follows from the symbol.
    #[must_use]
    pub fn new(asset_id: impl AsRef<str>, name: impl Into<String>, price: Decimal) -> Self {
        let asset_id = AssetId::new(asset_id);
        let category = AssetCategory::from_symbol(asset_id.as_str());
        Self {
            asset_id,
            name: name.into(),
            price,
            is_active: true,
            category,
        }
    }

    /// Return the same asset marked inactive.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case("BTC", AssetCategory::Major ; "btc")]
    #[test_case("eth", AssetCategory::Major ; "eth lowercase")]
    #[test_case("USDT", AssetCategory::Stablecoin ; "usdt")]
    #[test_case("USDC", AssetCategory::Stablecoin ; "usdc")]
    #[test_case("DAI", AssetCategory::Stablecoin ; "dai")]
    #[test_case("SOL", AssetCategory::Altcoin ; "sol")]
    #[test_case("", AssetCategory::Altcoin ; "empty")]
    fn category_from_symbol(symbol: &str, expected: AssetCategory) {
        assert_eq!(AssetCategory::from_symbol(symbol), expected);
    }

    #[test]
    fn new_asset_normalizes_symbol() {
        let asset = Asset::new("btc", "Bitcoin", dec!(45000));
        assert_eq!(asset.asset_id.as_str(), "BTC");
        assert_eq!(asset.category, AssetCategory::Major);
        assert!(asset.is_active);
        assert!(!asset.deactivated().is_active);
    }
}
