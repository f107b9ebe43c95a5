//! Accounting period types.

pub mod period;

pub use period::{Period, PeriodStatus};
