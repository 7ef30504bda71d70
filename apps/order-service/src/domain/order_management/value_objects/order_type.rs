//! Order type (market/limit crossed with buy/sell).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::OrderSide;

/// Order type specifying execution behavior and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Buy at the prevailing market price.
    MarketBuy,
    /// Sell at the prevailing market price.
    MarketSell,
    /// Buy at the specified price or better.
    LimitBuy,
    /// Sell at the specified price or better.
    LimitSell,
}

impl OrderType {
    /// All order types, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::MarketBuy,
        Self::MarketSell,
        Self::LimitBuy,
        Self::LimitSell,
    ];

    /// Returns true for LIMIT_* types, which require an `order_price`.
    #[must_use]
    pub const fn is_limit(&self) -> bool {
        matches!(self, Self::LimitBuy | Self::LimitSell)
    }

    /// Returns true for MARKET_* types, which must not carry an `order_price`.
    #[must_use]
    pub const fn is_market(&self) -> bool {
        matches!(self, Self::MarketBuy | Self::MarketSell)
    }

    /// Direction of the order.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        match self {
            Self::MarketBuy | Self::LimitBuy => OrderSide::Buy,
            Self::MarketSell | Self::LimitSell => OrderSide::Sell,
        }
    }

    /// Returns true for BUY types.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self.side(), OrderSide::Buy)
    }

    /// Wire name, e.g. `MARKET_BUY`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MarketBuy => "MARKET_BUY",
            Self::MarketSell => "MARKET_SELL",
            Self::LimitBuy => "LIMIT_BUY",
            Self::LimitSell => "LIMIT_SELL",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
