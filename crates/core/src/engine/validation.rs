//! Business rule validation for manually assembled entries.
//!
//! Engine-generated lines are validated inside the pipeline; this module
//! validates line sets keyed by a user before they become a draft entry.

use libro_shared::types::money::balance_tolerance;
use rust_decimal::Decimal;

use super::entry::EntryLine;
use super::error::EngineError;

/// Validates a manually assembled set of posting lines.
///
/// # Errors
///
/// * `NoLines` if the set is empty.
/// * `InvalidLineAmount` if any line does not carry a positive amount on
///   exactly one side.
/// * `SingleSided` if all lines are debits or all are credits.
/// * `UnbalancedEntry` if debits and credits differ by more than 1 cent.
pub fn validate_manual_lines(lines: &[EntryLine]) -> Result<(), EngineError> {
    if lines.is_empty() {
        return Err(EngineError::NoLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for line in lines {
        let debit_side = line.debit > Decimal::ZERO && line.credit == Decimal::ZERO;
        let credit_side = line.credit > Decimal::ZERO && line.debit == Decimal::ZERO;

        if debit_side {
            total_debit += line.debit;
            has_debit = true;
        } else if credit_side {
            total_credit += line.credit;
            has_credit = true;
        } else {
            return Err(EngineError::InvalidLineAmount);
        }
    }

    if !has_debit || !has_credit {
        return Err(EngineError::SingleSided);
    }

    if (total_debit - total_credit).abs() > balance_tolerance() {
        return Err(EngineError::UnbalancedEntry {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(())
}
