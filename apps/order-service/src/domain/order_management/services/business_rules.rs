//! Order Business Rules
//!
//! Field- and rule-level checks on order parameters, independent of
//! persistence. Every check returns `Result<(), RuleViolation>` and never
//! logs; [`OrderBusinessRules`] runs the whole battery and collects every
//! failure.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::order_management::errors::RuleViolation;
use crate::domain::order_management::value_objects::OrderType;

/// Smallest tradeable quantity (0.001).
pub const MIN_QUANTITY: Decimal = Decimal::from_parts(1, 0, 0, false, 3);
/// Largest tradeable quantity.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
/// Maximum fractional digits of a quantity.
pub const MAX_QUANTITY_DECIMALS: u32 = 8;
/// Maximum fractional digits of a price.
pub const MAX_PRICE_DECIMALS: u32 = 2;
/// Minimum notional value of a BUY order (1.00).
pub const MIN_ORDER_VALUE: Decimal = Decimal::from_parts(100, 0, 0, false, 2);
/// Price used to estimate the notional of a BUY order with no price (1.00).
pub const DEFAULT_ESTIMATE_PRICE: Decimal = Decimal::from_parts(100, 0, 0, false, 2);
/// How far ahead an order may expire, in days.
pub const MAX_EXPIRATION_DAYS: i64 = 30;

/// Number of significant fractional digits (trailing zeros ignored).
pub(crate) fn fractional_digits(value: Decimal) -> u32 {
    value.normalize().scale()
}

/// Quantity must lie in `[MIN_QUANTITY, MAX_QUANTITY]`.
pub fn validate_quantity_range(quantity: Decimal) -> Result<(), RuleViolation> {
    if quantity < MIN_QUANTITY {
        return Err(RuleViolation::new(
            "quantity",
            format!("Quantity must be at least {MIN_QUANTITY}"),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(RuleViolation::new(
            "quantity",
            format!("Quantity cannot exceed {MAX_QUANTITY}"),
        ));
    }
    Ok(())
}

/// Quantity may carry at most 8 fractional digits.
pub fn validate_quantity_precision(quantity: Decimal) -> Result<(), RuleViolation> {
    if fractional_digits(quantity) > MAX_QUANTITY_DECIMALS {
        return Err(RuleViolation::new(
            "quantity",
            format!("Quantity cannot have more than {MAX_QUANTITY_DECIMALS} decimal places"),
        ));
    }
    Ok(())
}

/// Price may carry at most 2 fractional digits.
pub fn validate_price_precision(price: Decimal) -> Result<(), RuleViolation> {
    if fractional_digits(price) > MAX_PRICE_DECIMALS {
        return Err(RuleViolation::new(
            "order_price",
            format!("Price cannot have more than {MAX_PRICE_DECIMALS} decimal places"),
        ));
    }
    Ok(())
}

/// Notional value `quantity * price`.
///
/// # Errors
///
/// Returns a violation when the product does not fit in a `Decimal`.
pub fn order_notional(quantity: Decimal, price: Decimal) -> Result<Decimal, RuleViolation> {
    quantity
        .checked_mul(price)
        .ok_or_else(|| RuleViolation::new("order_value", "Order value exceeds the supported range"))
}

/// BUY orders must reach `MIN_ORDER_VALUE` notional. SELL orders are not
/// checked.
///
/// Without a price the notional is estimated with `DEFAULT_ESTIMATE_PRICE`.
pub fn validate_order_value(
    order_type: OrderType,
    quantity: Decimal,
    price: Option<Decimal>,
) -> Result<(), RuleViolation> {
    if !order_type.is_buy() {
        return Ok(());
    }

    let notional = order_notional(quantity, price.unwrap_or(DEFAULT_ESTIMATE_PRICE))?;
    if notional < MIN_ORDER_VALUE {
        return Err(RuleViolation::new(
            "order_value",
            format!(
                "Order value {:.2} is below minimum of {MIN_ORDER_VALUE:.2}",
                notional
            ),
        ));
    }
    Ok(())
}

/// Expiration must be strictly in the future and at most 30 days ahead.
///
/// `None` means the order never expires.
pub fn validate_expiration_time(expires_at: Option<DateTime<Utc>>) -> Result<(), RuleViolation> {
    validate_expiration_time_at(expires_at, Utc::now())
}

/// [`validate_expiration_time`] against an explicit clock.
pub fn validate_expiration_time_at(
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), RuleViolation> {
    let Some(expires_at) = expires_at else {
        return Ok(());
    };

    if expires_at <= now {
        return Err(RuleViolation::new(
            "expires_at",
            "Expiration time must be in the future",
        ));
    }
    if expires_at > now + Duration::days(MAX_EXPIRATION_DAYS) {
        return Err(RuleViolation::new(
            "expires_at",
            format!("Expiration time cannot be more than {MAX_EXPIRATION_DAYS} days in the future"),
        ));
    }
    Ok(())
}

/// LIMIT_* orders need a price; MARKET_* orders must not have one.
pub fn validate_order_type_requirements(
    order_type: OrderType,
    price: Option<Decimal>,
) -> Result<(), RuleViolation> {
    match (order_type.is_limit(), price) {
        (true, None) => Err(RuleViolation::new(
            "order_price",
            format!("{order_type} order requires an order_price"),
        )),
        (false, Some(_)) => Err(RuleViolation::new(
            "order_price",
            format!("{order_type} order should not specify order_price"),
        )),
        _ => Ok(()),
    }
}

/// Aggregated order rule set.
pub struct OrderBusinessRules;

impl OrderBusinessRules {
    /// Run every order rule and collect all failures.
    ///
    /// Runs quantity range and precision, price precision (when a price is
    /// given), type/price consistency and expiration. An empty list means the
    /// order is valid.
    #[must_use]
    pub fn validate_all_business_rules(
        order_type: OrderType,
        quantity: Decimal,
        order_price: Option<Decimal>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Vec<RuleViolation> {
        Self::validate_all_business_rules_at(order_type, quantity, order_price, expires_at, Utc::now())
    }

    /// [`Self::validate_all_business_rules`] against an explicit clock.
    #[must_use]
    pub fn validate_all_business_rules_at(
        order_type: OrderType,
        quantity: Decimal,
        order_price: Option<Decimal>,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Vec<RuleViolation> {
        let mut checks = vec![
            validate_quantity_range(quantity),
            validate_quantity_precision(quantity),
        ];
        if let Some(price) = order_price {
            checks.push(validate_price_precision(price));
        }
        checks.push(validate_order_type_requirements(order_type, order_price));
        checks.push(validate_expiration_time_at(expires_at, now));

        checks.into_iter().filter_map(Result::err).collect()
    }
}
