//! Update Order Status Use Case

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::application::errors::OrderServiceError;
use crate::application::ports::{AssetRepositoryPort, BalanceRepositoryPort, UserRepositoryPort};
use crate::application::services::{OrderBusinessValidator, validate_order_id};
use crate::domain::order_management::{
    OrderRepository, OrderStatus, OrderStatusManager, TransitionError,
};

/// Who is asking for a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusActor {
    /// An authenticated user.
    User(String),
    /// Internal processing (matching engine, expiry sweeper).
    System,
}

impl StatusActor {
    fn username(&self) -> Option<&str> {
        match self {
            Self::User(username) => Some(username.as_str()),
            Self::System => None,
        }
    }

    const fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

/// Use case for moving orders through their lifecycle.
pub struct UpdateOrderStatusUseCase<U, A, B, O>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
{
    validator: Arc<OrderBusinessValidator<U, A, B, O>>,
    order_repo: Arc<O>,
}

impl<U, A, B, O> UpdateOrderStatusUseCase<U, A, B, O>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
{
    /// Create a new `UpdateOrderStatusUseCase`.
    pub const fn new(validator: Arc<OrderBusinessValidator<U, A, B, O>>, order_repo: Arc<O>) -> Self {
        Self {
            validator,
            order_repo,
        }
    }

    /// Cancel an order on behalf of `username`.
    ///
    /// # Errors
    ///
    /// See [`OrderBusinessValidator::validate_order_cancellation_business_rules`];
    /// [`OrderServiceError::Internal`] when the save fails.
    pub async fn cancel_order(
        &self,
        username: &str,
        order_id: &str,
    ) -> Result<OrderDto, OrderServiceError> {
        let mut order = self
            .validator
            .validate_order_cancellation_business_rules(username, order_id)
            .await?;

        let from = order.status();
        order.cancel_by_user(username)?;
        self.order_repo.save_if_status(&order, from).await?;

        tracing::info!(
            order_id = %order.order_id(),
            username,
            from = %from,
            "Order cancelled by user"
        );

        Ok(OrderDto::from_order(&order))
    }

    /// Move an order to `new_status`.
    ///
    /// Users must be allowed to act on the order and may only cancel it.
    /// Every other move belongs to the system; the status manager then
    /// decides whether the move itself is legal.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::Validation`] for a malformed ID or an illegal transition
    /// - [`OrderServiceError::NotFound`] for an unknown order or user
    /// - [`OrderServiceError::PermissionDenied`] when the actor may not make the move
    /// - [`OrderServiceError::Internal`] when storage fails
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        actor: StatusActor,
    ) -> Result<OrderDto, OrderServiceError> {
        let mut order = match actor.username() {
            Some(username) => {
                self.validator
                    .validate_order_retrieval_business_rules(username, order_id)
                    .await?
            }
            None => {
                let id = validate_order_id(order_id)?;
                self.order_repo
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(|| OrderServiceError::not_found("Order", order_id))?
            }
        };

        let from = order.status();
        if !actor.is_system()
            && new_status != OrderStatus::Cancelled
            && OrderStatusManager::can_transition(from, new_status)
        {
            let err = TransitionError::SystemOnly { to: new_status };
            tracing::warn!(order_id, from = %from, to = %new_status, error = %err, "Status change rejected");
            return Err(err.into());
        }
        order
            .transition_to(new_status, actor.username(), actor.is_system())
            .inspect_err(|e| {
                tracing::warn!(order_id, from = %from, to = %new_status, error = %e, "Status change rejected");
            })?;
        self.order_repo.save_if_status(&order, from).await?;

        tracing::info!(
            order_id,
            from = %from,
            to = %new_status,
            system = actor.is_system(),
            "Order status updated"
        );

        Ok(OrderDto::from_order(&order))
    }
}
