//! Order Management Domain Services
//!
//! Stateless logic that does not belong to a single order.

pub mod business_rules;
pub mod order_id;
mod order_status_manager;

pub use business_rules::{
    OrderBusinessRules, order_notional, validate_expiration_time, validate_order_type_requirements,
    validate_order_value, validate_price_precision, validate_quantity_precision,
    validate_quantity_range,
};
pub use order_id::{
    OrderIdComponents, OrderIdError, OrderIdFormat, OrderIdInfo, generate_order_id,
    generate_simple_order_id, generate_timestamped_order_id, get_order_id_info,
    is_valid_order_id, parse_order_id,
};
pub use order_status_manager::OrderStatusManager;
