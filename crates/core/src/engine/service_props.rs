//! Property-based tests for the generation pipeline.
//!
//! - Balance law: every successfully generated entry balances.
//! - Determinism: identical inputs produce identical amounts and hashes.
//! - Reversal: reversing a generated entry swaps the totals and balances.

use chrono::NaiveDate;
use libro_shared::config::EngineConfig;
use libro_shared::types::{AccountId, CompanyId, EventId, MappingId, PeriodId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::JournalEntry;
use super::error::EngineError;
use super::event::{AccountingEvent, EventCode};
use super::operation::OperationData;
use super::reversal::reverse_entry;
use super::rule::{AccountRoleMapping, AmountKind, PostingRule, Side};
use super::service::{EngineService, GenerateInput};
use crate::chart::{Account, AccountRole};
use crate::fiscal::{Period, PeriodStatus};

/// Strategy to generate positive amounts in cents (0.01 to 1,000,000.00).
fn positive_cents() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Runs the purchase rule set (base + VAT = total) against the given
/// operation data.
fn generate_purchase(operation: OperationData) -> Result<JournalEntry, EngineError> {
    let company_id = CompanyId::new();
    let event = AccountingEvent {
        id: EventId::new(),
        company_id,
        code: EventCode::Purchase,
        name: "Compra".to_string(),
        category: "compras".to_string(),
        is_active: true,
    };
    let rules = vec![
        PostingRule::unconditional(
            event.id,
            10,
            Side::Debit,
            AccountRole::PurchaseExpense,
            AmountKind::Base,
        ),
        PostingRule::unconditional(event.id, 20, Side::Debit, AccountRole::VatCredit, AmountKind::Vat),
        PostingRule::unconditional(
            event.id,
            30,
            Side::Credit,
            AccountRole::AccountsPayable,
            AmountKind::Total,
        ),
    ];

    let accounts: Vec<(AccountRole, Account)> = [
        (AccountRole::PurchaseExpense, "6011"),
        (AccountRole::VatCredit, "4011"),
        (AccountRole::AccountsPayable, "4212"),
    ]
    .into_iter()
    .map(|(role, code)| {
        (
            role,
            Account {
                id: AccountId::new(),
                company_id,
                code: code.to_string(),
                name: code.to_string(),
                class: role.expected_class(),
                is_active: true,
            },
        )
    })
    .collect();

    let input = GenerateInput::engine(
        company_id,
        EventCode::Purchase,
        operation,
        NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
        "Compra FT-0001",
    );

    EngineService::generate(
        &EngineConfig::default(),
        &input,
        |_, _| Some(event.clone()),
        |_| rules.clone(),
        |_, role| {
            accounts.iter().find(|(r, _)| *r == role).map(|(_, account)| {
                AccountRoleMapping {
                    id: MappingId::new(),
                    company_id,
                    role,
                    account_id: account.id,
                    is_active: true,
                }
            })
        },
        |id| {
            accounts
                .iter()
                .map(|(_, account)| account)
                .find(|account| account.id == id)
                .cloned()
        },
        |company_id, year, month| Period {
            id: PeriodId::new(),
            company_id,
            year,
            month,
            status: PeriodStatus::Open,
        },
    )
    .map(|result| result.entry)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every entry generated from a consistent rule set balances exactly.
    #[test]
    fn prop_generated_entries_balance(
        base_cents in positive_cents(),
        vat_cents in positive_cents(),
    ) {
        let base = Decimal::new(base_cents, 2);
        let vat = Decimal::new(vat_cents, 2);
        let operation = OperationData::new()
            .with("base", base)
            .with("igv", vat)
            .with("total", base + vat);

        let entry = generate_purchase(operation).unwrap();
        prop_assert!(entry.is_balanced());
        prop_assert_eq!(entry.total_debit(), base + vat);
        prop_assert_eq!(entry.total_credit(), base + vat);
    }

    /// An inconsistent rule set (total != base + vat beyond the tolerance)
    /// always fails instead of posting an unbalanced entry.
    #[test]
    fn prop_inconsistent_amounts_never_post(
        base_cents in positive_cents(),
        vat_cents in positive_cents(),
        skew_cents in 2i64..10_000i64,
    ) {
        let base = Decimal::new(base_cents, 2);
        let vat = Decimal::new(vat_cents, 2);
        let skew = Decimal::new(skew_cents, 2);
        let operation = OperationData::new()
            .with("base", base)
            .with("igv", vat)
            .with("total", base + vat + skew);

        let result = generate_purchase(operation);
        let unbalanced = matches!(&result, Err(EngineError::UnbalancedEntry { .. }));
        prop_assert!(unbalanced, "expected UnbalancedEntry, got: {:?}", result);
    }

    /// Identical inputs produce identical line amounts and integrity hashes.
    #[test]
    fn prop_generation_is_deterministic(
        base_cents in positive_cents(),
        vat_cents in positive_cents(),
    ) {
        let base = Decimal::new(base_cents, 2);
        let vat = Decimal::new(vat_cents, 2);
        let operation = OperationData::new()
            .with("base", base)
            .with("igv", vat)
            .with("total", base + vat);

        let first = generate_purchase(operation.clone()).unwrap();
        let second = generate_purchase(operation).unwrap();

        let first_amounts: Vec<(Decimal, Decimal)> =
            first.lines.iter().map(|l| (l.debit, l.credit)).collect();
        let second_amounts: Vec<(Decimal, Decimal)> =
            second.lines.iter().map(|l| (l.debit, l.credit)).collect();
        prop_assert_eq!(first_amounts, second_amounts);
        prop_assert_eq!(first.total_debit(), second.total_debit());
    }

    /// Reversing a generated entry swaps totals and stays balanced.
    #[test]
    fn prop_reversal_balances(
        base_cents in positive_cents(),
        vat_cents in positive_cents(),
    ) {
        let base = Decimal::new(base_cents, 2);
        let vat = Decimal::new(vat_cents, 2);
        let operation = OperationData::new()
            .with("base", base)
            .with("igv", vat)
            .with("total", base + vat);

        let mut entry = generate_purchase(operation).unwrap();
        let original_debit = entry.total_debit();
        let (date, period_id) = (entry.entry_date, entry.period_id);
        let reversing = reverse_entry(&mut entry, date, period_id, "property check").unwrap();

        prop_assert!(reversing.is_balanced());
        prop_assert_eq!(reversing.total_credit(), original_debit);
        prop_assert!(reversing.verify_integrity());
    }
}
