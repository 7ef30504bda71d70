//! Query Orders Use Case

use std::sync::Arc;

use crate::application::dto::{ListOrdersQueryDto, OrderDto, OrderListDto};
use crate::application::errors::OrderServiceError;
use crate::application::ports::{AssetRepositoryPort, BalanceRepositoryPort, UserRepositoryPort};
use crate::application::services::OrderBusinessValidator;
use crate::domain::order_management::OrderRepository;

/// Use case for reading orders.
pub struct QueryOrdersUseCase<U, A, B, O>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
{
    validator: Arc<OrderBusinessValidator<U, A, B, O>>,
    order_repo: Arc<O>,
    default_limit: usize,
}

impl<U, A, B, O> QueryOrdersUseCase<U, A, B, O>
where
    U: UserRepositoryPort,
    A: AssetRepositoryPort,
    B: BalanceRepositoryPort,
    O: OrderRepository,
{
    /// Create a new `QueryOrdersUseCase`. `default_limit` applies when a
    /// listing names no limit.
    pub const fn new(
        validator: Arc<OrderBusinessValidator<U, A, B, O>>,
        order_repo: Arc<O>,
        default_limit: usize,
    ) -> Self {
        Self {
            validator,
            order_repo,
            default_limit,
        }
    }

    /// Fetch one order visible to `username`.
    ///
    /// # Errors
    ///
    /// See [`OrderBusinessValidator::validate_order_retrieval_business_rules`].
    pub async fn get_order(
        &self,
        username: &str,
        order_id: &str,
    ) -> Result<OrderDto, OrderServiceError> {
        let order = self
            .validator
            .validate_order_retrieval_business_rules(username, order_id)
            .await?;
        Ok(OrderDto::from_order(&order))
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// See [`OrderBusinessValidator::validate_order_listing_business_rules`];
    /// [`OrderServiceError::Internal`] when the read fails.
    pub async fn list_orders(
        &self,
        query: ListOrdersQueryDto,
    ) -> Result<OrderListDto, OrderServiceError> {
        let user = self
            .validator
            .validate_order_listing_business_rules(&query.username, query.limit)
            .await?;

        let limit = query
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(self.default_limit);

        let orders = self
            .order_repo
            .find_by_username(&user.username, query.status, Some(limit))
            .await?;

        tracing::debug!(
            username = %user.username,
            status = ?query.status,
            limit,
            count = orders.len(),
            "Orders listed"
        );

        Ok(OrderListDto::from_orders(&orders, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::ErrorCategory;
    use crate::domain::accounts::User;
    use crate::domain::order_management::{Order, OrderStatus, OrderType, ReconstitutedOrderParams};
    use crate::domain::shared::{AssetId, OrderId, Username};
    use crate::infrastructure::persistence::{
        InMemoryAssetStore, InMemoryOrderRepository, InMemoryTransactionManager, InMemoryUserStore,
    };
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    type UseCase = QueryOrdersUseCase<
        InMemoryUserStore,
        InMemoryAssetStore,
        InMemoryTransactionManager,
        InMemoryOrderRepository,
    >;

    fn order(n: i64, username: &str, status: OrderStatus) -> Order {
        let created = Utc::now() - Duration::minutes(100 - n);
        Order::reconstitute(ReconstitutedOrderParams {
            order_id: OrderId::new(format!("ord_{}_{n:04}_{username}", created.timestamp())),
            username: Username::new(username),
            order_type: OrderType::MarketSell,
            asset_id: AssetId::new("ETH"),
            quantity: dec!(1),
            order_price: None,
            total_amount: dec!(3000),
            status,
            expires_at: None,
            created_at: created,
            updated_at: created,
        })
        .unwrap()
    }

    async fn setup(default_limit: usize) -> UseCase {
        let orders = Arc::new(InMemoryOrderRepository::new());
        for n in 0..5 {
            let status = if n % 2 == 0 {
                OrderStatus::Pending
            } else {
                OrderStatus::Cancelled
            };
            orders.add(order(n, "alice", status)).await;
        }
        orders.add(order(9, "bob", OrderStatus::Pending)).await;

        let validator = Arc::new(OrderBusinessValidator::new(
            Arc::new(InMemoryUserStore::with_users([
                User::customer("alice"),
                User::customer("bob"),
            ])),
            Arc::new(InMemoryAssetStore::new()),
            Arc::new(InMemoryTransactionManager::new(
                orders.clone(),
                std::time::Duration::from_secs(1),
            )),
            orders.clone(),
        ));
        QueryOrdersUseCase::new(validator, orders, default_limit)
    }

    fn query(limit: Option<i64>, status: Option<OrderStatus>) -> ListOrdersQueryDto {
        ListOrdersQueryDto {
            username: "alice".to_string(),
            status,
            limit,
        }
    }

    #[tokio::test]
    async fn lists_newest_first_with_default_limit() {
        let use_case = setup(3).await;
        let list = use_case.list_orders(query(None, None)).await.unwrap();

        assert_eq!(list.limit, 3);
        assert_eq!(list.count, 3);
        assert!(list.orders.iter().all(|o| o.username == "alice"));
        assert!(list.orders[0].created_at > list.orders[1].created_at);
        assert!(list.orders[0].order_id.contains("_0004_"));
    }

    #[tokio::test]
    async fn filters_by_status() {
        let use_case = setup(50).await;
        let list = use_case
            .list_orders(query(None, Some(OrderStatus::Cancelled)))
            .await
            .unwrap();
        assert_eq!(list.count, 2);
        assert!(list.orders.iter().all(|o| o.status == OrderStatus::Cancelled));
    }

    #[tokio::test]
    async fn explicit_limit_is_validated() {
        let use_case = setup(50).await;
        assert_eq!(use_case.list_orders(query(Some(1), None)).await.unwrap().count, 1);

        let err = use_case.list_orders(query(Some(0), None)).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(use_case.list_orders(query(Some(101), None)).await.is_err());
    }

    #[tokio::test]
    async fn get_order_respects_ownership() {
        let use_case = setup(50).await;
        let list = use_case.list_orders(query(Some(1), None)).await.unwrap();
        let order_id = &list.orders[0].order_id;

        assert!(use_case.get_order("alice", order_id).await.is_ok());
        let err = use_case.get_order("bob", order_id).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Permission);
    }
}
