//! Infrastructure Configuration
//!
//! Dependency injection for the order service.

mod container;

pub use container::{Container, InMemoryContainer};
