//! Observability module for structured logging.
//!
//! Components emit `tracing` events with structured fields; this module
//! installs the subscriber that formats them.

mod logging;

pub use logging::{LoggingError, build_filter, init_logging};
