//! Infrastructure Layer
//!
//! This module contains the adapters (implementations) for the ports defined
//! in the application layer:
//!
//! - `persistence/`: In-memory order repository, user and asset stores, and
//!   the transaction manager that also serves balances
//! - `config/`: Dependency injection container wiring adapters to use cases

pub mod config;
pub mod persistence;
