//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`order_management`]: Order lifecycle, business rules and order IDs
//! - [`accounts`]: Users, roles and fiat balances
//! - [`assets`]: Tradeable assets and their categories

pub mod accounts;
pub mod assets;
pub mod order_management;
pub mod shared;
