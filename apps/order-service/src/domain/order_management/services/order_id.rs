//! Order ID generation and parsing.
//!
//! Order IDs are `_`-separated and always start with `ord`:
//!
//! ```text
//! ord_20260119_120000_1a2b3c4d_alice   standard (UTC date, time, token, user)
//! ord_1768824000_1a2b3c4d_alice        timestamped (unix seconds)
//! ord_1a2b3c4d5e6f_7a8b9c0d1e2f        simple (uuid halves)
//! ```
//!
//! The trailing username is optional. Parsing only looks at segment
//! positions: a username containing `_` is reported by its last piece.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Literal prefix of every order ID.
pub const ORDER_ID_PREFIX: &str = "ord";
/// Segment separator.
pub const ORDER_ID_SEPARATOR: char = '_';

const MIN_SEGMENTS: usize = 3;
const USERNAME_MIN_SEGMENTS: usize = 4;
const TOKEN_LEN: usize = 8;
const SIMPLE_HALF_LEN: usize = 12;

/// Order ID that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderIdError {
    /// Fewer than three `_`-separated segments.
    TooFewSegments,
    /// First segment is not `ord`.
    InvalidPrefix {
        /// Prefix found.
        found: String,
    },
}

impl fmt::Display for OrderIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSegments => write!(
                f,
                "Invalid order ID format: expected at least {MIN_SEGMENTS} parts separated by '{ORDER_ID_SEPARATOR}'"
            ),
            Self::InvalidPrefix { found } => write!(
                f,
                "Invalid order ID prefix: expected '{ORDER_ID_PREFIX}', got '{found}'"
            ),
        }
    }
}

impl std::error::Error for OrderIdError {}

/// Segments recovered from an order ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderIdComponents {
    /// Always `ord` for a parsed ID.
    pub prefix: String,
    /// Last segment.
    pub unique_id: String,
    /// Last segment, present only when the ID has at least four segments.
    pub username: Option<String>,
    /// Second segment, when it is an integer.
    pub unix_timestamp: Option<i64>,
}

/// Shape of a valid order ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderIdFormat {
    /// Second segment is an integer.
    Timestamped,
    /// Anything else.
    Standard,
}

/// Diagnostic summary of an order ID. Never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderIdInfo {
    /// Whether the ID parsed.
    pub valid: bool,
    /// Detected shape (valid IDs only).
    pub format: Option<OrderIdFormat>,
    /// Parsed segments (valid IDs only).
    pub components: Option<OrderIdComponents>,
    /// Parse error message (invalid IDs only).
    pub error: Option<String>,
}

fn random_hex(len: usize) -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(len);
    hex
}

fn with_username(mut id: String, username: Option<&str>) -> String {
    if let Some(username) = username.filter(|u| !u.is_empty()) {
        id.push(ORDER_ID_SEPARATOR);
        id.push_str(username);
    }
    id
}

/// Generate `ord_<YYYYMMDD>_<HHMMSS>_<token>[_<username>]` from the UTC clock.
#[must_use]
pub fn generate_order_id(username: Option<&str>) -> String {
    generate_order_id_at(Utc::now(), username)
}

/// [`generate_order_id`] against an explicit clock.
#[must_use]
pub fn generate_order_id_at(now: DateTime<Utc>, username: Option<&str>) -> String {
    let id = format!(
        "{ORDER_ID_PREFIX}_{}_{}",
        now.format("%Y%m%d_%H%M%S"),
        random_hex(TOKEN_LEN)
    );
    with_username(id, username)
}

/// Generate `ord_<unix seconds>_<token>[_<username>]`.
#[must_use]
pub fn generate_timestamped_order_id(username: Option<&str>) -> String {
    generate_timestamped_order_id_at(Utc::now(), username)
}

/// [`generate_timestamped_order_id`] against an explicit clock.
#[must_use]
pub fn generate_timestamped_order_id_at(now: DateTime<Utc>, username: Option<&str>) -> String {
    let id = format!(
        "{ORDER_ID_PREFIX}_{}_{}",
        now.timestamp(),
        random_hex(TOKEN_LEN)
    );
    with_username(id, username)
}

/// Generate `ord_<12 hex>_<12 hex>` from a v4 UUID.
#[must_use]
pub fn generate_simple_order_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!(
        "{ORDER_ID_PREFIX}_{}_{}",
        &hex[..SIMPLE_HALF_LEN],
        &hex[SIMPLE_HALF_LEN..2 * SIMPLE_HALF_LEN]
    )
}

/// Split an order ID into its segments.
///
/// # Errors
///
/// Returns [`OrderIdError`] when the ID has fewer than three segments or
/// does not start with `ord`.
pub fn parse_order_id(order_id: &str) -> Result<OrderIdComponents, OrderIdError> {
    let segments: Vec<&str> = order_id.split(ORDER_ID_SEPARATOR).collect();
    if segments.len() < MIN_SEGMENTS {
        return Err(OrderIdError::TooFewSegments);
    }

    let prefix = segments[0];
    if prefix != ORDER_ID_PREFIX {
        return Err(OrderIdError::InvalidPrefix {
            found: prefix.to_string(),
        });
    }

    let last = segments[segments.len() - 1];
    let username = (segments.len() >= USERNAME_MIN_SEGMENTS).then(|| last.to_string());

    Ok(OrderIdComponents {
        prefix: prefix.to_string(),
        unique_id: last.to_string(),
        username,
        unix_timestamp: segments[1].parse().ok(),
    })
}

/// Returns true if [`parse_order_id`] accepts the ID.
#[must_use]
pub fn is_valid_order_id(order_id: &str) -> bool {
    parse_order_id(order_id).is_ok()
}

/// Describe an order ID without failing.
#[must_use]
pub fn get_order_id_info(order_id: &str) -> OrderIdInfo {
    match parse_order_id(order_id) {
        Ok(components) => OrderIdInfo {
            valid: true,
            format: Some(if components.unix_timestamp.is_some() {
                OrderIdFormat::Timestamped
            } else {
                OrderIdFormat::Standard
            }),
            components: Some(components),
            error: None,
        },
        Err(err) => OrderIdInfo {
            valid: false,
            format: None,
            components: None,
            error: Some(err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-19T12:34:56Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn generated_id_has_date_time_token_and_user() {
        let id = generate_order_id_at(fixed_now(), Some("alice"));
        let parts: Vec<&str> = id.split('_').collect();

        assert_eq!(parts.len(), 5);
        assert_eq!(parts[0], "ord");
        assert_eq!(parts[1], "20260119");
        assert_eq!(parts[2], "123456");
        assert_eq!(parts[3].len(), 8);
        assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts[4], "alice");
    }

    #[test]
    fn generated_id_without_user() {
        let id = generate_order_id_at(fixed_now(), None);
        assert_eq!(id.split('_').count(), 4);
        assert!(is_valid_order_id(&id));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_order_id(Some("alice"));
        let b = generate_order_id(Some("alice"));
        assert_ne!(a, b);
    }

    #[test]
    fn timestamped_id_round_trips_timestamp() {
        let now = fixed_now();
        let id = generate_timestamped_order_id_at(now, Some("bob"));
        let parsed = parse_order_id(&id).unwrap();

        assert_eq!(parsed.unix_timestamp, Some(now.timestamp()));
        assert_eq!(parsed.username.as_deref(), Some("bob"));
        assert_eq!(parsed.unique_id, "bob");
    }

    #[test]
    fn simple_id_shape() {
        let id = generate_simple_order_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 12);
        assert_eq!(parts[2].len(), 12);

        let parsed = parse_order_id(&id).unwrap();
        assert_eq!(parsed.username, None);
        assert_eq!(parsed.unique_id, parts[2]);
    }

    #[test]
    fn three_segments_have_no_username() {
        let parsed = parse_order_id("ord_1700000000_abcd1234").unwrap();
        assert_eq!(parsed.prefix, "ord");
        assert_eq!(parsed.unique_id, "abcd1234");
        assert_eq!(parsed.username, None);
        assert_eq!(parsed.unix_timestamp, Some(1_700_000_000));
    }

    #[test]
    fn too_few_segments_rejected() {
        let err = parse_order_id("ord_abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid order ID format: expected at least 3 parts separated by '_'"
        );
        assert!(!is_valid_order_id(""));
    }

    #[test]
    fn wrong_prefix_rejected() {
        let err = parse_order_id("xyz_123_abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid order ID prefix: expected 'ord', got 'xyz'"
        );
    }

    #[test]
    fn info_for_timestamped_id() {
        let info = get_order_id_info("ord_1700000000_abcd1234_alice");
        assert!(info.valid);
        assert_eq!(info.format, Some(OrderIdFormat::Timestamped));
        assert_eq!(info.error, None);
    }

    #[test]
    fn info_for_standard_id() {
        let info = get_order_id_info("ord_abc_def");
        assert!(info.valid);
        assert_eq!(info.format, Some(OrderIdFormat::Standard));
    }

    #[test]
    fn info_for_invalid_id() {
        let info = get_order_id_info("bad");
        assert!(!info.valid);
        assert!(info.components.is_none());
        assert!(info.error.unwrap().contains("at least 3 parts"));
    }

    #[test]
    fn date_segment_reads_as_timestamp() {
        let id = generate_order_id_at(fixed_now(), Some("alice"));
        let parsed = parse_order_id(&id).unwrap();
        assert_eq!(parsed.unix_timestamp, Some(20_260_119));
    }

    proptest! {
        #[test]
        fn generated_ids_parse_with_username(username in "[a-zA-Z0-9-]{3,20}") {
            for id in [
                generate_order_id(Some(&username)),
                generate_timestamped_order_id(Some(&username)),
            ] {
                let parsed = parse_order_id(&id).unwrap();
                prop_assert_eq!(parsed.prefix.as_str(), ORDER_ID_PREFIX);
                prop_assert_eq!(parsed.username.as_deref(), Some(username.as_str()));
            }
        }
    }
}
