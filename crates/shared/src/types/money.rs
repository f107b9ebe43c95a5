//! Monetary rounding helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` rounded to 2 decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for all monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary amount to 2 decimal places using round-half-up.
///
/// Half-up (midpoint away from zero) matches the rounding convention of
/// Peruvian tax documents, where 0.005 rounds to 0.01.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Maximum tolerated difference between total debits and credits.
///
/// One cent absorbs rounding of per-line amounts; anything larger is a
/// configuration defect and must be rejected.
#[must_use]
pub fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2)
}
