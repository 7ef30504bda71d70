//! Accounts Bounded Context
//!
//! Users and their fiat balances, as far as the order service needs them.

mod balance;
mod user;

pub use balance::Balance;
pub use user::{User, UserRole};
