//! Order Management Bounded Context
//!
//! Order lifecycle, business rules and order identifiers.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: created in `PENDING` once every business rule passes
//! - **Status Manager**: the transition table plus user/system actor rules
//! - **Order IDs**: `ord_`-prefixed, `_`-separated, optionally ending with the owner

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{CreateOrderCommand, Order, ReconstitutedOrderParams};
pub use errors::{OrderError, RuleViolation, TransitionError};
pub use repository::OrderRepository;
pub use services::{OrderBusinessRules, OrderStatusManager};
pub use value_objects::{OrderSide, OrderStatus, OrderType};
