//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for interacting with external systems
//! - **Services**: Request validation shared by the use cases
//! - **Use Cases**: Application-specific business rules
//! - **DTOs**: Data transfer objects for API boundaries
//! - **Errors**: The order service error taxonomy

pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dto::*;
pub use errors::{ErrorCategory, OrderServiceError};
pub use ports::*;
pub use use_cases::*;
