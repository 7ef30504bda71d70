//! Order field validators.
//!
//! Input checks applied to raw request fields before any lookup. These are
//! stricter on shape (usernames, symbols) than the domain rules and carry
//! their own expiration policy: limit orders must expire, at most one year
//! ahead. The domain's 30-day rule still applies when the order is built.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::application::dto::CreateOrderDto;
use crate::application::errors::OrderServiceError;
use crate::domain::order_management::OrderType;
use crate::domain::order_management::services::business_rules::{
    validate_price_precision, validate_quantity_precision, validate_quantity_range,
};
use crate::domain::order_management::services::parse_order_id;
use crate::domain::shared::{AssetId, OrderId, Username};

/// Username length bounds.
pub const USERNAME_MIN_LEN: usize = 3;
/// Username length bounds.
pub const USERNAME_MAX_LEN: usize = 50;
/// Asset symbol maximum length.
pub const ASSET_ID_MAX_LEN: usize = 10;
/// Highest accepted limit price.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// How far ahead a limit order may expire at this layer, in days.
pub const MAX_EXPIRES_AT_DAYS: i64 = 365;

/// Request fields after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrderRequest {
    /// Owner.
    pub username: Username,
    /// Type.
    pub order_type: OrderType,
    /// Uppercased symbol.
    pub asset_id: AssetId,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price.
    pub order_price: Option<Decimal>,
    /// Expiration.
    pub expires_at: Option<DateTime<Utc>>,
}

/// 3-50 characters of ASCII letters, digits, `_` or `-`.
///
/// # Errors
///
/// Returns [`OrderServiceError::Validation`] on a malformed username.
pub fn validate_username(username: &str) -> Result<Username, OrderServiceError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(OrderServiceError::validation("Username is required"));
    }

    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(OrderServiceError::validation(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(OrderServiceError::validation(
            "Username can only contain letters, numbers, underscores and hyphens",
        ));
    }
    Ok(Username::new(username))
}

/// 1-10 ASCII alphanumerics, returned uppercased.
///
/// # Errors
///
/// Returns [`OrderServiceError::Validation`] on a malformed symbol.
pub fn validate_asset_id(asset_id: &str) -> Result<AssetId, OrderServiceError> {
    let asset_id = asset_id.trim();
    if asset_id.is_empty() {
        return Err(OrderServiceError::validation("Asset ID is required"));
    }
    if asset_id.len() > ASSET_ID_MAX_LEN {
        return Err(OrderServiceError::validation(format!(
            "Asset ID cannot be longer than {ASSET_ID_MAX_LEN} characters"
        )));
    }
    if !asset_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(OrderServiceError::validation(
            "Asset ID can only contain letters and numbers",
        ));
    }
    Ok(AssetId::new(asset_id))
}

/// Positive, at most 8 decimals, within `[0.001, 1000]`.
///
/// # Errors
///
/// Returns [`OrderServiceError::Validation`] with the first failed check.
pub fn validate_quantity(quantity: Decimal) -> Result<Decimal, OrderServiceError> {
    if quantity <= Decimal::ZERO {
        return Err(OrderServiceError::validation("Quantity must be positive"));
    }
    validate_quantity_precision(quantity)
        .and_then(|()| validate_quantity_range(quantity))
        .map_err(|v| OrderServiceError::validation(v.message))?;
    Ok(quantity)
}

/// Positive, at most 2 decimals, at most 1,000,000.
///
/// # Errors
///
/// Returns [`OrderServiceError::Validation`] with the first failed check.
pub fn validate_price(price: Decimal) -> Result<Decimal, OrderServiceError> {
    if price <= Decimal::ZERO {
        return Err(OrderServiceError::validation("Price must be positive"));
    }
    validate_price_precision(price).map_err(|v| OrderServiceError::validation(v.message))?;
    if price > MAX_PRICE {
        return Err(OrderServiceError::validation(format!(
            "Price cannot exceed {MAX_PRICE}"
        )));
    }
    Ok(price)
}

/// Required for limit orders; when given, strictly future and at most one
/// year ahead.
///
/// # Errors
///
/// Returns [`OrderServiceError::Validation`] with the first failed check.
pub fn validate_expires_at(
    order_type: OrderType,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, OrderServiceError> {
    let Some(at) = expires_at else {
        if order_type.is_limit() {
            return Err(OrderServiceError::validation(
                "expires_at is required for limit orders",
            ));
        }
        return Ok(None);
    };

    if at <= now {
        return Err(OrderServiceError::validation(
            "expires_at must be in the future",
        ));
    }
    if at > now + Duration::days(MAX_EXPIRES_AT_DAYS) {
        return Err(OrderServiceError::validation(format!(
            "expires_at cannot be more than {MAX_EXPIRES_AT_DAYS} days in the future"
        )));
    }
    Ok(Some(at))
}

/// Structural order ID check.
///
/// # Errors
///
/// Returns [`OrderServiceError::Validation`] with the parser's message.
pub fn validate_order_id(order_id: &str) -> Result<OrderId, OrderServiceError> {
    parse_order_id(order_id).map_err(|e| OrderServiceError::validation(e.to_string()))?;
    Ok(OrderId::new(order_id))
}

/// Validate every field of a creation request.
///
/// Also enforces that only limit orders carry a price.
///
/// # Errors
///
/// Returns the first failing field as [`OrderServiceError::Validation`].
pub fn validate_create_order_request(
    dto: &CreateOrderDto,
    now: DateTime<Utc>,
) -> Result<ValidatedOrderRequest, OrderServiceError> {
    let username = validate_username(&dto.username)?;
    let asset_id = validate_asset_id(&dto.asset_id)?;
    let quantity = validate_quantity(dto.quantity)?;

    let order_price = match (dto.order_type.is_limit(), dto.order_price) {
        (true, Some(price)) => Some(validate_price(price)?),
        (true, None) => {
            return Err(OrderServiceError::validation(format!(
                "{} order requires an order_price",
                dto.order_type
            )));
        }
        (false, Some(_)) => {
            return Err(OrderServiceError::validation(format!(
                "{} order should not specify order_price",
                dto.order_type
            )));
        }
        (false, None) => None,
    };

    let expires_at = validate_expires_at(dto.order_type, dto.expires_at, now)?;

    Ok(ValidatedOrderRequest {
        username,
        order_type: dto.order_type,
        asset_id,
        quantity,
        order_price,
        expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn message(err: OrderServiceError) -> String {
        match err {
            OrderServiceError::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test_case("alice" ; "plain")]
    #[test_case("bob_99" ; "underscore")]
    #[test_case("carol-x" ; "hyphen")]
    #[test_case("abc" ; "minimum length")]
    fn valid_usernames(input: &str) {
        assert_eq!(validate_username(input).unwrap().as_str(), input);
    }

    #[test_case("" ; "empty")]
    #[test_case("ab" ; "too short")]
    #[test_case("has space" ; "space")]
    #[test_case("semi;colon" ; "punctuation")]
    fn invalid_usernames(input: &str) {
        assert!(validate_username(input).is_err());
    }

    #[test]
    fn username_too_long() {
        let long = "a".repeat(51);
        assert!(message(validate_username(&long).unwrap_err()).contains("between 3 and 50"));
        assert!(validate_username(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn asset_id_is_uppercased() {
        assert_eq!(validate_asset_id("btc").unwrap().as_str(), "BTC");
        assert_eq!(validate_asset_id("Usdt").unwrap().as_str(), "USDT");
    }

    #[test_case("" ; "empty")]
    #[test_case("ABCDEFGHIJK" ; "eleven chars")]
    #[test_case("BTC-USD" ; "hyphen")]
    fn invalid_asset_ids(input: &str) {
        assert!(validate_asset_id(input).is_err());
    }

    #[test]
    fn quantity_checks() {
        assert_eq!(validate_quantity(dec!(0.5)).unwrap(), dec!(0.5));
        assert_eq!(
            message(validate_quantity(dec!(0)).unwrap_err()),
            "Quantity must be positive"
        );
        assert_eq!(
            message(validate_quantity(dec!(0.0001)).unwrap_err()),
            "Quantity must be at least 0.001"
        );
        assert_eq!(
            message(validate_quantity(dec!(1.123456789)).unwrap_err()),
            "Quantity cannot have more than 8 decimal places"
        );
        assert!(validate_quantity(dec!(1001)).is_err());
    }

    #[test]
    fn price_checks() {
        assert!(validate_price(dec!(45000.50)).is_ok());
        assert!(validate_price(dec!(1000000)).is_ok());
        assert!(validate_price(dec!(-1)).is_err());
        assert!(validate_price(dec!(1.005)).is_err());
        assert_eq!(
            message(validate_price(dec!(1000000.01)).unwrap_err()),
            "Price cannot exceed 1000000"
        );
    }

    #[test]
    fn expires_at_required_for_limit_orders() {
        let now = Utc::now();
        let err = validate_expires_at(OrderType::LimitSell, None, now).unwrap_err();
        assert_eq!(message(err), "expires_at is required for limit orders");
        assert_eq!(validate_expires_at(OrderType::MarketBuy, None, now).unwrap(), None);
    }

    #[test]
    fn expires_at_window_is_one_year() {
        let now = Utc::now();
        assert!(validate_expires_at(OrderType::LimitBuy, Some(now + Duration::days(200)), now).is_ok());
        assert!(validate_expires_at(OrderType::LimitBuy, Some(now - Duration::seconds(1)), now).is_err());
        assert!(validate_expires_at(OrderType::LimitBuy, Some(now + Duration::days(366)), now).is_err());
    }

    #[test]
    fn order_id_checks() {
        assert!(validate_order_id("ord_1700000000_abcd1234_alice").is_ok());
        assert!(message(validate_order_id("order-1").unwrap_err()).contains("at least 3 parts"));
        assert!(message(validate_order_id("abc_1_2").unwrap_err()).contains("prefix"));
    }

    fn request(order_type: OrderType, order_price: Option<Decimal>) -> CreateOrderDto {
        CreateOrderDto {
            username: "alice".to_string(),
            order_type,
            asset_id: "btc".to_string(),
            quantity: dec!(0.5),
            order_price,
            expires_at: order_type.is_limit().then(|| Utc::now() + Duration::days(7)),
        }
    }

    #[test]
    fn create_request_normalizes_fields() {
        let validated =
            validate_create_order_request(&request(OrderType::LimitBuy, Some(dec!(45000))), Utc::now())
                .unwrap();
        assert_eq!(validated.asset_id.as_str(), "BTC");
        assert_eq!(validated.order_price, Some(dec!(45000)));
    }

    #[test]
    fn create_request_checks_price_presence() {
        let now = Utc::now();
        let err = validate_create_order_request(&request(OrderType::LimitBuy, None), now).unwrap_err();
        assert_eq!(message(err), "LIMIT_BUY order requires an order_price");

        let err = validate_create_order_request(&request(OrderType::MarketSell, Some(dec!(1))), now)
            .unwrap_err();
        assert_eq!(message(err), "MARKET_SELL order should not specify order_price");
    }
}
