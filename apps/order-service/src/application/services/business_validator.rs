//! Order Business Validator
//!
//! Rules that need lookups: users, assets, balances and existing orders.
//! Each check returns the entities it loaded so callers do not fetch twice.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::errors::OrderServiceError;
use crate::application::ports::{AssetRepositoryPort, BalanceRepositoryPort, UserRepositoryPort};
use crate::application::services::field_validators::validate_order_id;
use crate::domain::accounts::User;
use crate::domain::assets::Asset;
use crate::domain::order_management::services::{order_notional, validate_order_value};
use crate::domain::order_management::{
    Order, OrderRepository, OrderStatus, OrderStatusManager, OrderType,
};
use crate::domain::shared::{AssetId, Username};

/// Smallest accepted listing limit.
pub const MIN_LIST_LIMIT: i64 = 1;
/// Largest accepted listing limit.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Entities loaded while validating an order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationContext {
    /// Active owner.
    pub user: User,
    /// Active asset.
    pub asset: Asset,
    /// Balance before the order (zero when the user has none).
    pub available_balance: Decimal,
}

/// Lookup-backed business checks for the order service.
pub struct OrderBusinessValidator<U, A, B, O>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
{
    users: Arc<U>,
    assets: Arc<A>,
    balances: Arc<B>,
    orders: Arc<O>,
}

impl<U, A, B, O> OrderBusinessValidator<U, A, B, O>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
{
    /// Create a new validator.
    pub const fn new(users: Arc<U>, assets: Arc<A>, balances: Arc<B>, orders: Arc<O>) -> Self {
        Self {
            users,
            assets,
            balances,
            orders,
        }
    }

    /// Check that a user may place this order and can pay for it.
    ///
    /// The user and the asset must exist and be active, the order must
    /// reach the minimum value, and a BUY order must be covered by the
    /// user's balance. SELL orders are not checked against holdings.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::NotFound`] for an unknown user or asset
    /// - [`OrderServiceError::PermissionDenied`] for an inactive user
    /// - [`OrderServiceError::Validation`] for an inactive asset or a too small order
    /// - [`OrderServiceError::InsufficientBalance`] when a BUY is not covered
    pub async fn validate_order_creation_business_rules(
        &self,
        username: &Username,
        asset_id: &AssetId,
        order_type: OrderType,
        quantity: Decimal,
        effective_price: Decimal,
    ) -> Result<CreationContext, OrderServiceError> {
        let user = self.require_user(username.as_str()).await?;
        if !user.is_active {
            return Err(OrderServiceError::PermissionDenied(
                "User account is inactive".to_string(),
            ));
        }

        let asset = self
            .assets
            .get_asset_by_id(asset_id)
            .await?
            .ok_or_else(|| OrderServiceError::not_found("Asset", asset_id.as_str()))?;
        if !asset.is_active {
            return Err(OrderServiceError::validation(format!(
                "Asset {asset_id} is not available for trading"
            )));
        }

        let notional = order_notional(quantity, effective_price)
            .map_err(|v| OrderServiceError::validation(v.message))?;
        validate_order_value(order_type, quantity, Some(effective_price))
            .map_err(|v| OrderServiceError::validation(v.message))?;

        let available_balance = self
            .balances
            .get_balance(username.as_str())
            .await?
            .map_or(Decimal::ZERO, |b| b.current_balance);

        if order_type.is_buy() {
            if available_balance < notional {
                return Err(OrderServiceError::InsufficientBalance {
                    required: notional,
                    available: available_balance,
                });
            }
        }

        Ok(CreationContext {
            user,
            asset,
            available_balance,
        })
    }

    /// Check that `username` may cancel `order_id` and return the order.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::Validation`] for a malformed ID or an illegal transition
    /// - [`OrderServiceError::NotFound`] for an unknown user or order
    /// - [`OrderServiceError::PermissionDenied`] when the user may not act on
    ///   the order or the order is past user control
    pub async fn validate_order_cancellation_business_rules(
        &self,
        username: &str,
        order_id: &str,
    ) -> Result<Order, OrderServiceError> {
        let order = self.load_owned_order(username, order_id).await?;
        OrderStatusManager::validate_transition(
            order.status(),
            OrderStatus::Cancelled,
            Some(username),
            false,
        )?;
        Ok(order)
    }

    /// Check a listing request.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::NotFound`] for an unknown user
    /// - [`OrderServiceError::Validation`] for a limit outside 1..=100
    pub async fn validate_order_listing_business_rules(
        &self,
        username: &str,
        limit: Option<i64>,
    ) -> Result<User, OrderServiceError> {
        if limit.is_some_and(|l| !(MIN_LIST_LIMIT..=MAX_LIST_LIMIT).contains(&l)) {
            return Err(OrderServiceError::validation(format!(
                "Limit must be between {MIN_LIST_LIMIT} and {MAX_LIST_LIMIT}"
            )));
        }
        self.require_user(username).await
    }

    /// Check that `username` may read `order_id` and return the order.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::Validation`] for a malformed ID
    /// - [`OrderServiceError::NotFound`] for an unknown user or order
    /// - [`OrderServiceError::PermissionDenied`] when the user may not see the order
    pub async fn validate_order_retrieval_business_rules(
        &self,
        username: &str,
        order_id: &str,
    ) -> Result<Order, OrderServiceError> {
        self.load_owned_order(username, order_id).await
    }

    /// Admins may act on anyone, customers only on themselves. Inactive
    /// users may not act at all.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::PermissionDenied`] when the actor may not
    /// act on `target_username`.
    pub fn validate_user_permissions(
        actor: &User,
        target_username: &str,
    ) -> Result<(), OrderServiceError> {
        if !actor.is_active {
            return Err(OrderServiceError::PermissionDenied(
                "User account is inactive".to_string(),
            ));
        }
        if actor.is_admin() || actor.username.as_str() == target_username {
            return Ok(());
        }
        Err(OrderServiceError::PermissionDenied(
            "Access denied: order belongs to another user".to_string(),
        ))
    }

    async fn require_user(&self, username: &str) -> Result<User, OrderServiceError> {
        self.users
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| OrderServiceError::not_found("User", username))
    }

    async fn load_owned_order(
        &self,
        username: &str,
        order_id: &str,
    ) -> Result<Order, OrderServiceError> {
        let order_id = validate_order_id(order_id)?;
        let actor = self.require_user(username).await?;

        let order = self
            .orders
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| OrderServiceError::not_found("Order", order_id.as_str()))?;

        Self::validate_user_permissions(&actor, order.username().as_str())?;
        Ok(order)
    }
}
