//! Application Services
//!
//! Request validation shared by the use cases.

pub mod business_validator;
pub mod field_validators;
mod market_price;

pub use business_validator::{
    CreationContext, MAX_LIST_LIMIT, MIN_LIST_LIMIT, OrderBusinessValidator,
};
pub use field_validators::{
    ValidatedOrderRequest, validate_asset_id, validate_create_order_request, validate_expires_at,
    validate_order_id, validate_price, validate_quantity, validate_username,
};
pub use market_price::get_current_market_price;
