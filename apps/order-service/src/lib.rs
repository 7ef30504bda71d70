// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Service - Rust Core Library
//!
//! Order lifecycle and validation core for the trading platform.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `order_management`: Order aggregate, status state machine, order IDs,
//!     business rules
//!   - `accounts`: Users, roles, balances
//!   - `assets`: Tradable assets
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: User, asset and balance lookups, transaction manager
//!   - `services`: Field validators, business validator, market price
//!   - `use_cases`: `CreateOrder`, `UpdateOrderStatus`, `QueryOrders`
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory order repository, lookup stores,
//!     transaction manager
//!   - `config`: Dependency injection container
//!
//! Cross-cutting: `config` (YAML loading) and `observability` (logging).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Service configuration loading and validation.
pub mod config;

/// Structured logging setup.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::order_management::{
    CreateOrderCommand, Order, OrderBusinessRules, OrderError, OrderSide, OrderStatus,
    OrderStatusManager, OrderType,
};
pub use domain::shared::{AssetId, DomainError, OrderId, Username};

// Application re-exports
pub use application::dto::{CreateOrderDto, ListOrdersQueryDto, OrderDto, OrderListDto};
pub use application::errors::{ErrorCategory, OrderServiceError};
pub use application::ports::{
    AssetRepositoryPort, BalanceRepositoryPort, TransactionManagerPort, UserRepositoryPort,
};
pub use application::use_cases::{
    CreateOrderUseCase, QueryOrdersUseCase, StatusActor, UpdateOrderStatusUseCase,
};

// Infrastructure re-exports
pub use infrastructure::config::{Container, InMemoryContainer};
pub use infrastructure::persistence::{
    InMemoryAssetStore, InMemoryOrderRepository, InMemoryTransactionManager, InMemoryUserStore,
};
