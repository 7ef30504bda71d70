//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AssetRepositoryPort, BalanceRepositoryPort, TransactionManagerPort, UserRepositoryPort,
};
use crate::application::services::OrderBusinessValidator;
use crate::application::use_cases::{
    CreateOrderUseCase, QueryOrdersUseCase, UpdateOrderStatusUseCase,
};
use crate::config::Config;
use crate::domain::order_management::OrderRepository;
use crate::infrastructure::persistence::{
    InMemoryAssetStore, InMemoryOrderRepository, InMemoryTransactionManager, InMemoryUserStore,
};

/// Container wired entirely with in-memory adapters.
///
/// The transaction manager doubles as the balance store.
pub type InMemoryContainer = Container<
    InMemoryUserStore,
    InMemoryAssetStore,
    InMemoryTransactionManager,
    InMemoryOrderRepository,
    InMemoryTransactionManager,
>;

/// Dependency injection container.
pub struct Container<U, A, B, O, T>
where
    U: UserRepositoryPort + 'static,
    A: AssetRepositoryPort + 'static,
    B: BalanceRepositoryPort + 'static,
    O: OrderRepository + 'static,
    T: TransactionManagerPort + 'static,
{
    // Ports
    user_repo: Arc<U>,
    asset_repo: Arc<A>,
    balance_repo: Arc<B>,
    order_repo: Arc<O>,
    transactions: Arc<T>,

    // Shared services
    validator: Arc<OrderBusinessValidator<U, A, B, O>>,
    default_list_limit: usize,
}

impl<U, A, B, O, T> Container<U, A, B, O, T>
where
    U: UserRepositoryPort + 'static,
    A: AssetRepositoryPort + 'static,
    B: BalanceRepositoryPort + 'static,
    O: OrderRepository + 'static,
    T: TransactionManagerPort + 'static,
{
    /// Create a new container with all dependencies.
    pub fn new(
        user_repo: Arc<U>,
        asset_repo: Arc<A>,
        balance_repo: Arc<B>,
        order_repo: Arc<O>,
        transactions: Arc<T>,
        default_list_limit: usize,
    ) -> Self {
        let validator = Arc::new(OrderBusinessValidator::new(
            Arc::clone(&user_repo),
            Arc::clone(&asset_repo),
            Arc::clone(&balance_repo),
            Arc::clone(&order_repo),
        ));
        Self {
            user_repo,
            asset_repo,
            balance_repo,
            order_repo,
            transactions,
            validator,
            default_list_limit,
        }
    }

    /// Get the user repository port.
    pub fn user_repo(&self) -> Arc<U> {
        Arc::clone(&self.user_repo)
    }

    /// Get the asset repository port.
    pub fn asset_repo(&self) -> Arc<A> {
        Arc::clone(&self.asset_repo)
    }

    /// Get the balance repository port.
    pub fn balance_repo(&self) -> Arc<B> {
        Arc::clone(&self.balance_repo)
    }

    /// Get the order repository.
    pub fn order_repo(&self) -> Arc<O> {
        Arc::clone(&self.order_repo)
    }

    /// Get the transaction manager port.
    pub fn transactions(&self) -> Arc<T> {
        Arc::clone(&self.transactions)
    }

    /// Get the shared business validator.
    pub fn validator(&self) -> Arc<OrderBusinessValidator<U, A, B, O>> {
        Arc::clone(&self.validator)
    }

    /// Create a `CreateOrderUseCase`.
    pub fn create_order_use_case(&self) -> CreateOrderUseCase<U, A, B, O, T> {
        CreateOrderUseCase::new(
            Arc::clone(&self.validator),
            Arc::clone(&self.asset_repo),
            Arc::clone(&self.transactions),
        )
    }

    /// Create an `UpdateOrderStatusUseCase`.
    pub fn update_order_status_use_case(&self) -> UpdateOrderStatusUseCase<U, A, B, O> {
        UpdateOrderStatusUseCase::new(Arc::clone(&self.validator), Arc::clone(&self.order_repo))
    }

    /// Create a `QueryOrdersUseCase`.
    pub fn query_orders_use_case(&self) -> QueryOrdersUseCase<U, A, B, O> {
        QueryOrdersUseCase::new(
            Arc::clone(&self.validator),
            Arc::clone(&self.order_repo),
            self.default_list_limit,
        )
    }
}

impl InMemoryContainer {
    /// Wire in-memory adapters using the transaction and listing settings
    /// from `config`.
    #[must_use]
    pub fn in_memory(config: &Config) -> Self {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let transactions = Arc::new(InMemoryTransactionManager::new(
            Arc::clone(&orders),
            Duration::from_millis(config.transactions.lock_timeout_ms),
        ));

        Self::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryAssetStore::new()),
            Arc::clone(&transactions),
            orders,
            transactions,
            config.listing.default_limit,
        )
    }
}
