//! Amount resolution for applicable posting rules.
//!
//! Purely numeric: this module knows nothing about accounts or sides. It
//! extracts the amount a rule's `AmountKind` names from the operation data,
//! defaulting missing numeric fields to 0.00, and rounds half-up to 2
//! decimal places before the amount is used anywhere else.

use libro_shared::types::money::round_amount;
use rust_decimal::Decimal;

use super::operation::OperationData;
use super::rule::AmountKind;

/// Operation-data field carrying the taxable base.
pub const FIELD_BASE: &str = "base";
/// Operation-data field carrying the IGV (Peruvian VAT) amount.
pub const FIELD_VAT: &str = "igv";
/// Operation-data field carrying the document total.
pub const FIELD_TOTAL: &str = "total";

/// Resolves the monetary amount a rule posts.
///
/// Missing or non-numeric fields resolve to 0.00.
#[must_use]
pub fn resolve_amount(kind: &AmountKind, data: &OperationData) -> Decimal {
    let field = match kind {
        AmountKind::Base => FIELD_BASE,
        AmountKind::Vat => FIELD_VAT,
        AmountKind::Total => FIELD_TOTAL,
        AmountKind::Custom(field) => field.as_str(),
    };

    round_amount(data.number(field).unwrap_or(Decimal::ZERO))
}
