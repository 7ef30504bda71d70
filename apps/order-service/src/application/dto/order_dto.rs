//! Order DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_management::{Order, OrderSide, OrderStatus, OrderType};

/// DTO for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderDto {
    /// Authenticated user placing the order.
    pub username: String,
    /// Type.
    pub order_type: OrderType,
    /// Asset symbol.
    pub asset_id: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price (LIMIT_* only).
    #[serde(default)]
    pub order_price: Option<Decimal>,
    /// Expiration (required for LIMIT_*).
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// DTO representing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order ID.
    pub order_id: String,
    /// Owner.
    pub username: String,
    /// Type.
    pub order_type: OrderType,
    /// Side.
    pub side: OrderSide,
    /// Asset symbol.
    pub asset_id: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price.
    pub order_price: Option<Decimal>,
    /// Notional value at creation time.
    pub total_amount: Decimal,
    /// Status.
    pub status: OrderStatus,
    /// Expiration.
    pub expires_at: Option<DateTime<Utc>>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl OrderDto {
    /// Create from domain Order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.order_id().to_string(),
            username: order.username().to_string(),
            order_type: order.order_type(),
            side: order.side(),
            asset_id: order.asset_id().to_string(),
            quantity: order.quantity(),
            order_price: order.order_price(),
            total_amount: order.total_amount(),
            status: order.status(),
            expires_at: order.expires_at(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// Query DTO for listing a user's orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOrdersQueryDto {
    /// User whose orders are listed.
    pub username: String,
    /// Only orders in this status.
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Maximum number of orders (1..=100). Falls back to the configured default.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Response DTO for an order listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListDto {
    /// Orders, newest first.
    pub orders: Vec<OrderDto>,
    /// Number of orders returned.
    pub count: usize,
    /// Limit applied.
    pub limit: usize,
}

impl OrderListDto {
    /// Build a listing from domain orders.
    #[must_use]
    pub fn from_orders(orders: &[Order], limit: usize) -> Self {
        let orders: Vec<OrderDto> = orders.iter().map(OrderDto::from_order).collect();
        Self {
            count: orders.len(),
            orders,
            limit,
        }
    }
}
