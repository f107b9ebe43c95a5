//! Property-based tests for the restricted condition interpreter.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::condition::{CmpOp, Condition, Literal};
use super::operation::OperationData;

/// Strategy to generate a decimal amount with 2 decimal places.
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a comparison operator symbol.
fn op_symbol() -> impl Strategy<Value = (&'static str, CmpOp)> {
    prop_oneof![
        Just(("==", CmpOp::Eq)),
        Just(("!=", CmpOp::Ne)),
        Just((">", CmpOp::Gt)),
        Just(("<", CmpOp::Lt)),
        Just((">=", CmpOp::Ge)),
        Just(("<=", CmpOp::Le)),
    ]
}

/// Strategy to generate a plain identifier.
fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Parsing arbitrary input never panics; it returns Ok or a typed error.
    #[test]
    fn prop_parse_never_panics(raw in ".{0,64}") {
        let _ = Condition::parse(&raw);
    }

    /// Evaluating arbitrary parsed conditions never panics, regardless of
    /// what the operation data holds.
    #[test]
    fn prop_evaluate_never_panics(
        field in identifier(),
        (symbol, _) in op_symbol(),
        literal in amount(),
        value in amount(),
    ) {
        let raw = format!("{field} {symbol} {literal}");
        if let Ok(condition) = Condition::parse(&raw) {
            let data = OperationData::new().with(field.as_str(), value);
            let _ = condition.evaluate(&data);
        }
    }

    /// Numeric comparisons agree with `Decimal` ordering for every operator.
    #[test]
    fn prop_numeric_comparison_matches_decimal_ordering(
        field in identifier(),
        (symbol, op) in op_symbol(),
        literal in amount(),
        value in amount(),
    ) {
        let raw = format!("{field} {symbol} {literal}");
        let condition = Condition::parse(&raw).unwrap();
        prop_assert_eq!(condition.op, op);

        let data = OperationData::new().with(field.as_str(), value);
        let expected = match op {
            CmpOp::Eq => value == literal,
            CmpOp::Ne => value != literal,
            CmpOp::Gt => value > literal,
            CmpOp::Lt => value < literal,
            CmpOp::Ge => value >= literal,
            CmpOp::Le => value <= literal,
        };
        prop_assert_eq!(condition.evaluate(&data).unwrap(), expected);
    }

    /// Text equality follows string equality; quoting style does not matter.
    #[test]
    fn prop_text_equality(
        field in identifier(),
        literal in "[A-Z]{1,10}",
        value in "[A-Z]{1,10}",
    ) {
        let single = Condition::parse(&format!("{field} == '{literal}'")).unwrap();
        let double = Condition::parse(&format!("{field} == \"{literal}\"")).unwrap();
        prop_assert_eq!(&single.literal, &Literal::Text(literal.clone()));
        prop_assert_eq!(&single.literal, &double.literal);

        let data = OperationData::new().with(field.as_str(), value.as_str());
        prop_assert_eq!(single.evaluate(&data).unwrap(), value == literal);
        prop_assert_eq!(double.evaluate(&data).unwrap(), value == literal);
    }

    /// Ordering operators reject non-numeric literals at parse time.
    #[test]
    fn prop_ordering_requires_numeric_literal(
        field in identifier(),
        symbol in prop_oneof![Just(">"), Just("<"), Just(">="), Just("<=")],
        literal in "[A-Z]{1,10}",
    ) {
        let raw = format!("{field} {symbol} '{literal}'");
        prop_assert!(Condition::parse(&raw).is_err());
    }

    /// A condition on a field absent from the operation data always errors,
    /// never silently resolves to false.
    #[test]
    fn prop_missing_field_is_an_error(
        field in identifier(),
        (symbol, _) in op_symbol(),
        literal in amount(),
    ) {
        let raw = format!("{field} {symbol} {literal}");
        let condition = Condition::parse(&raw).unwrap();
        prop_assert!(condition.evaluate(&OperationData::new()).is_err());
    }
}
