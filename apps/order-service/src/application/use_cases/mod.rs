//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod create_order;
mod query_orders;
mod update_order_status;

pub use create_order::CreateOrderUseCase;
pub use query_orders::QueryOrdersUseCase;
pub use update_order_status::{StatusActor, UpdateOrderStatusUseCase};
