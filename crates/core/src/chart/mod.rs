//! Chart of accounts types.
//!
//! The engine only reads accounts; ownership of the chart of accounts
//! (creation, renumbering, deactivation) belongs to a separate module.

pub mod account;
pub mod role;

pub use account::{Account, AccountClass};
pub use role::AccountRole;
