//! Order Aggregate Root
//!
//! An order is created in `PENDING` after every business rule passes and
//! then only changes status through the [`OrderStatusManager`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::order_management::errors::OrderError;
use crate::domain::order_management::services::order_id::generate_order_id;
use crate::domain::order_management::services::{
    OrderBusinessRules, OrderStatusManager, order_notional,
};
use crate::domain::order_management::value_objects::{OrderSide, OrderStatus, OrderType};
use crate::domain::shared::{AssetId, DomainError, OrderId, Username};

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Owner of the order.
    pub username: Username,
    /// Order type.
    pub order_type: OrderType,
    /// Asset to trade.
    pub asset_id: AssetId,
    /// Quantity to trade.
    pub quantity: Decimal,
    /// Limit price (LIMIT_* only).
    pub order_price: Option<Decimal>,
    /// Optional expiration.
    pub expires_at: Option<DateTime<Utc>>,
    /// Price used for `total_amount`: the limit price, or the market price
    /// for market orders.
    pub effective_price: Decimal,
}

/// Parameters for reconstituting an Order from storage.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub order_id: OrderId,
    /// Owner of the order.
    pub username: Username,
    /// Order type.
    pub order_type: OrderType,
    /// Asset traded.
    pub asset_id: AssetId,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price.
    pub order_price: Option<Decimal>,
    /// Notional value at creation time.
    pub total_amount: Decimal,
    /// Current status.
    pub status: OrderStatus,
    /// Optional expiration.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Order Aggregate Root.
#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    order_id: OrderId,
    username: Username,
    order_type: OrderType,
    asset_id: AssetId,
    quantity: Decimal,
    order_price: Option<Decimal>,
    total_amount: Decimal,
    status: OrderStatus,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new `PENDING` order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::RuleViolations`] listing every failed business
    /// rule.
    pub fn create(cmd: CreateOrderCommand) -> Result<Self, OrderError> {
        Self::create_at(cmd, Utc::now())
    }

    /// [`Self::create`] against an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::RuleViolations`] listing every failed business
    /// rule.
    pub fn create_at(cmd: CreateOrderCommand, now: DateTime<Utc>) -> Result<Self, OrderError> {
        let violations = OrderBusinessRules::validate_all_business_rules_at(
            cmd.order_type,
            cmd.quantity,
            cmd.order_price,
            cmd.expires_at,
            now,
        );
        if !violations.is_empty() {
            return Err(OrderError::RuleViolations(violations));
        }

        let total_amount = order_notional(cmd.quantity, cmd.effective_price)
            .map_err(|v| OrderError::RuleViolations(vec![v]))?;
        let order_id = OrderId::new(generate_order_id(Some(cmd.username.as_str())));

        Ok(Self {
            order_id,
            username: cmd.username,
            order_type: cmd.order_type,
            asset_id: cmd.asset_id,
            quantity: cmd.quantity,
            order_price: cmd.order_price,
            total_amount,
            status: OrderStatus::Pending,
            expires_at: cmd.expires_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild an order from stored state.
    ///
    /// Business rules are not re-run (they depend on the clock), only the
    /// structural invariant that a price is present iff the order is a limit
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvariantViolation`] when the stored price does
    /// not match the order type.
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Result<Self, DomainError> {
        if params.order_type.is_limit() != params.order_price.is_some() {
            return Err(DomainError::InvariantViolation {
                aggregate: "Order".to_string(),
                invariant: "order_price present iff LIMIT order".to_string(),
                state: format!(
                    "{} {} has order_price {:?}",
                    params.order_id, params.order_type, params.order_price
                ),
            });
        }

        Ok(Self {
            order_id: params.order_id,
            username: params.username,
            order_type: params.order_type,
            asset_id: params.asset_id,
            quantity: params.quantity,
            order_price: params.order_price,
            total_amount: params.total_amount,
            status: params.status,
            expires_at: params.expires_at,
            created_at: params.created_at,
            updated_at: params.updated_at,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Get the owner.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Get the order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Get the order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.order_type.side()
    }

    /// Get the asset.
    #[must_use]
    pub const fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Get the limit price.
    #[must_use]
    pub const fn order_price(&self) -> Option<Decimal> {
        self.order_price
    }

    /// Get the notional value at creation time.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the expiration time.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Get the creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the last update time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if the order is owned by `username`.
    #[must_use]
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username.as_str() == username
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Move the order to `to`.
    ///
    /// `username` is set for user-initiated changes and `is_system` for
    /// internal processing.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Transition`] if the status manager rejects the
    /// change. The order is left untouched.
    pub fn transition_to(
        &mut self,
        to: OrderStatus,
        username: Option<&str>,
        is_system: bool,
    ) -> Result<(), OrderError> {
        OrderStatusManager::validate_transition(self.status, to, username, is_system)?;
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancel the order on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Transition`] when the order is past user control.
    pub fn cancel_by_user(&mut self, username: &str) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Cancelled, Some(username), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_management::errors::TransitionError;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn limit_buy() -> CreateOrderCommand {
        CreateOrderCommand {
            username: Username::new("alice"),
            order_type: OrderType::LimitBuy,
            asset_id: AssetId::new("btc"),
            quantity: dec!(0.5),
            order_price: Some(dec!(45000)),
            expires_at: Some(Utc::now() + Duration::days(7)),
            effective_price: dec!(45000),
        }
    }

    fn market_sell() -> CreateOrderCommand {
        CreateOrderCommand {
            username: Username::new("bob"),
            order_type: OrderType::MarketSell,
            asset_id: AssetId::new("ETH"),
            quantity: dec!(2),
            order_price: None,
            expires_at: None,
            effective_price: dec!(3000),
        }
    }

    #[test]
    fn create_rejects_notional_beyond_decimal_range() {
        let cmd = CreateOrderCommand {
            order_type: OrderType::MarketBuy,
            quantity: dec!(1000),
            order_price: None,
            expires_at: None,
            effective_price: Decimal::from_i128_with_scale(
                100_000_000_000_000_000_000_000_000,
                0,
            ),
            ..limit_buy()
        };

        let err = Order::create(cmd).unwrap_err();
        assert_eq!(err.to_string(), "Order value exceeds the supported range");
    }

    #[test]
    fn create_starts_pending() {
        let order = Order::create(limit_buy()).unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.side(), OrderSide::Buy);
        assert_eq!(order.asset_id().as_str(), "BTC");
        assert_eq!(order.total_amount(), dec!(22500));
        assert_eq!(order.created_at(), order.updated_at());
        assert!(order.order_id().as_str().starts_with("ord_"));
        assert!(order.order_id().as_str().ends_with("_alice"));
        assert!(order.is_owned_by("alice"));
    }

    #[test]
    fn market_order_total_uses_effective_price() {
        let order = Order::create(market_sell()).unwrap();
        assert_eq!(order.total_amount(), dec!(6000));
        assert_eq!(order.order_price(), None);
    }

    #[test]
    fn create_collects_all_violations() {
        let mut cmd = limit_buy();
        cmd.quantity = dec!(0.0001);
        cmd.order_price = Some(dec!(45000.123));
        cmd.expires_at = Some(Utc::now() + Duration::days(31));

        match Order::create(cmd) {
            Err(OrderError::RuleViolations(violations)) => assert!(violations.len() >= 3),
            other => panic!("expected rule violations, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_market_order_with_price() {
        let mut cmd = market_sell();
        cmd.order_price = Some(dec!(3000));

        let err = Order::create(cmd).unwrap_err();
        assert!(err.to_string().contains("should not specify order_price"));
    }

    #[test]
    fn full_lifecycle() {
        let mut order = Order::create(limit_buy()).unwrap();

        order.transition_to(OrderStatus::Confirmed, None, true).unwrap();
        order.transition_to(OrderStatus::Processing, None, true).unwrap();
        order.transition_to(OrderStatus::Completed, None, true).unwrap();

        assert_eq!(order.status(), OrderStatus::Completed);
        assert!(order.updated_at() >= order.created_at());
    }

    #[test]
    fn rejected_transition_leaves_order_untouched() {
        let mut order = Order::create(limit_buy()).unwrap();
        let before = order.clone();

        let err = order
            .transition_to(OrderStatus::Completed, None, true)
            .unwrap_err();

        assert_eq!(
            err,
            OrderError::Transition(TransitionError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Completed,
            })
        );
        assert_eq!(order, before);
    }

    #[test]
    fn user_cancel_pending_order() {
        let mut order = Order::create(limit_buy()).unwrap();
        order.cancel_by_user("alice").unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn user_cannot_fail_order() {
        let mut order = Order::create(limit_buy()).unwrap();
        let err = order
            .transition_to(OrderStatus::Failed, Some("alice"), false)
            .unwrap_err();
        assert_eq!(err.to_string(), "Only system can mark orders as failed");
    }

    fn stored(order_type: OrderType, order_price: Option<Decimal>) -> ReconstitutedOrderParams {
        let now = Utc::now();
        ReconstitutedOrderParams {
            order_id: OrderId::new("ord_1700000000_abcd1234_alice"),
            username: Username::new("alice"),
            order_type,
            asset_id: AssetId::new("BTC"),
            quantity: dec!(1),
            order_price,
            total_amount: dec!(100),
            status: OrderStatus::Queued,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn reconstitute_keeps_stored_status() {
        let order = Order::reconstitute(stored(OrderType::LimitBuy, Some(dec!(100)))).unwrap();
        assert_eq!(order.status(), OrderStatus::Queued);
    }

    #[test]
    fn reconstitute_rejects_price_mismatch() {
        assert!(Order::reconstitute(stored(OrderType::LimitSell, None)).is_err());
        assert!(Order::reconstitute(stored(OrderType::MarketBuy, Some(dec!(1)))).is_err());
    }

    #[test]
    fn queued_order_user_cancel_rejected() {
        let mut order = Order::reconstitute(stored(OrderType::LimitBuy, Some(dec!(100)))).unwrap();
        let err = order.cancel_by_user("alice").unwrap_err();
        assert!(matches!(
            err,
            OrderError::Transition(TransitionError::CancellationNotAllowed { .. })
        ));
        assert_eq!(order.status(), OrderStatus::Queued);
    }

    #[test]
    fn order_serializes_wire_names() {
        let order = Order::create(limit_buy()).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_type"], "LIMIT_BUY");
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["asset_id"], "BTC");
    }
}
