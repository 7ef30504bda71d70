//! Create Order Use Case

use std::sync::Arc;

use chrono::Utc;

use crate::application::dto::{CreateOrderDto, OrderDto};
use crate::application::errors::OrderServiceError;
use crate::application::ports::{
    AssetRepositoryPort, BalanceRepositoryPort, TransactionManagerPort, UserRepositoryPort,
};
use crate::application::services::{
    OrderBusinessValidator, get_current_market_price, validate_create_order_request,
};
use crate::domain::order_management::{CreateOrderCommand, Order, OrderRepository, OrderSide};

/// Use case for placing a new order.
///
/// Validation runs in layers: request fields, lookups (user, asset,
/// balance), then the domain rules inside `Order::create`. Only then is the
/// order handed to the transaction manager, which moves the money and
/// stores the order atomically.
pub struct CreateOrderUseCase<U, A, B, O, T>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
    T: TransactionManagerPort,
{
    validator: Arc<OrderBusinessValidator<U, A, B, O>>,
    asset_repo: Arc<A>,
    transactions: Arc<T>,
}

impl<U, A, B, O, T> CreateOrderUseCase<U, A, B, O, T>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
    T: TransactionManagerPort,
{
    /// Create a new `CreateOrderUseCase`.
    pub const fn new(
        validator: Arc<OrderBusinessValidator<U, A, B, O>>,
        asset_repo: Arc<A>,
        transactions: Arc<T>,
    ) -> Self {
        Self {
            validator,
            asset_repo,
            transactions,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::Validation`] for bad fields or broken rules
    /// - [`OrderServiceError::InsufficientBalance`] when a BUY is not covered
    /// - [`OrderServiceError::NotFound`] for an unknown user or asset
    /// - [`OrderServiceError::PermissionDenied`] for an inactive user
    /// - [`OrderServiceError::Internal`] when storage fails
    pub async fn execute(&self, dto: CreateOrderDto) -> Result<OrderDto, OrderServiceError> {
        let now = Utc::now();

        // 1. Request fields
        let request = validate_create_order_request(&dto, now)?;

        // 2. Effective price
        let effective_price = match request.order_price {
            Some(price) => price,
            None => get_current_market_price(&request.asset_id, self.asset_repo.as_ref()).await?,
        };

        // 3. Lookup-backed rules
        self.validator
            .validate_order_creation_business_rules(
                &request.username,
                &request.asset_id,
                request.order_type,
                request.quantity,
                effective_price,
            )
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    username = %request.username,
                    asset_id = %request.asset_id,
                    order_type = %request.order_type,
                    error = %e,
                    "Order rejected"
                );
            })?;

        // 4. Domain rules
        let order = Order::create_at(
            CreateOrderCommand {
                username: request.username,
                order_type: request.order_type,
                asset_id: request.asset_id,
                quantity: request.quantity,
                order_price: request.order_price,
                expires_at: request.expires_at,
                effective_price,
            },
            now,
        )?;

        // 5. Atomic balance update + persistence
        let committed = match order.side() {
            OrderSide::Buy => {
                self.transactions
                    .create_buy_order_with_balance_update(&order)
                    .await
            }
            OrderSide::Sell => {
                self.transactions
                    .create_sell_order_with_balance_update(&order)
                    .await
            }
        }
        .map_err(|e| {
            tracing::warn!(order_id = %order.order_id(), error = %e, "Order transaction failed");
            OrderServiceError::from(e)
        })?;

        tracing::info!(
            order_id = %committed.order.order_id(),
            username = %committed.order.username(),
            order_type = %committed.order.order_type(),
            asset_id = %committed.order.asset_id(),
            total_amount = %committed.order.total_amount(),
            balance = %committed.balance.current_balance,
            "Order created"
        );

        Ok(OrderDto::from_order(&committed.order))
    }
}
