//! The journal-entry generation pipeline.
//!
//! `EngineService::generate` is the single entry point consumed by the
//! purchase/sale/treasury/inventory modules. It is a synchronous pipeline
//! with no internal state: all configuration lookups are injected as
//! closures and read fresh on every call, inside whatever transaction the
//! caller holds. Any failure aborts with a typed error and no partial
//! output.

use chrono::{Datelike, NaiveDate, Utc};
use libro_shared::config::EngineConfig;
use libro_shared::types::money::balance_tolerance;
use libro_shared::types::{AccountId, CompanyId, EntryId, EventId};
use rust_decimal::Decimal;

use super::amount::resolve_amount;
use super::condition::Condition;
use super::entry::{integrity_hash, EntryLine, EntryOrigin, EntryStatus, JournalEntry};
use super::error::EngineError;
use super::event::{AccountingEvent, EventCode};
use super::mapping::{
    check_family_guard, resolve_role_account, validate_account_active, GuardCheck,
};
use super::operation::OperationData;
use super::rule::{AccountRoleMapping, PostingRule, Side};
use super::store::load_event_rules;
use super::trace::{GenerationTrace, TraceRecorder};
use super::validation::validate_manual_lines;
use crate::chart::{Account, AccountRole};
use crate::fiscal::Period;

/// Input for one generation call.
#[derive(Debug, Clone)]
pub struct GenerateInput {
    /// The company to generate for.
    pub company_id: CompanyId,
    /// The business event type.
    pub code: EventCode,
    /// Already-computed operation amounts and attributes.
    pub operation: OperationData,
    /// Posting date.
    pub date: NaiveDate,
    /// Free-text narrative (glosa).
    pub memo: String,
    /// Who is producing the entry.
    pub origin: EntryOrigin,
}

impl GenerateInput {
    /// Creates an engine-origin input (the normal case).
    #[must_use]
    pub fn engine(
        company_id: CompanyId,
        code: EventCode,
        operation: OperationData,
        date: NaiveDate,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            company_id,
            code,
            operation,
            date,
            memo: memo.into(),
            origin: EntryOrigin::Engine,
        }
    }
}

/// Output of a successful generation call.
#[derive(Debug)]
pub struct GenerationResult {
    /// The generated, balanced entry (already carries the trace as metadata).
    pub entry: JournalEntry,
    /// The typed run trace.
    pub trace: GenerationTrace,
}

/// Stateless journal-entry generation service.
pub struct EngineService;

impl EngineService {
    /// Generates a balanced journal entry for a business event.
    ///
    /// Pipeline: load event and rules, check the period, filter rules by
    /// condition, then per rule resolve amount and account under the
    /// mapping and family-guard invariants, and finally assemble the
    /// balanced entry with its integrity hash and run trace.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine settings (strict guard mode)
    /// * `input` - The generation request
    /// * `active_event` - Lookup of the active event definition
    /// * `active_rules` - Lookup of the event's active rules
    /// * `active_mapping` - Lookup of the company's active role mapping
    /// * `account_by_id` - Account lookup
    /// * `get_or_open_period` - Period get-or-open collaborator
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if any validation stage fails; nothing is
    /// produced in that case.
    #[allow(clippy::too_many_lines)]
    pub fn generate<Ev, Ru, Ma, Ac, Pe>(
        config: &EngineConfig,
        input: &GenerateInput,
        active_event: Ev,
        active_rules: Ru,
        active_mapping: Ma,
        account_by_id: Ac,
        get_or_open_period: Pe,
    ) -> Result<GenerationResult, EngineError>
    where
        Ev: Fn(CompanyId, EventCode) -> Option<AccountingEvent>,
        Ru: Fn(EventId) -> Vec<PostingRule>,
        Ma: Fn(CompanyId, AccountRole) -> Option<AccountRoleMapping>,
        Ac: Fn(AccountId) -> Option<Account>,
        Pe: Fn(CompanyId, i32, u32) -> Period,
    {
        let mut trace = TraceRecorder::start(input.company_id, input.code, &input.operation);

        // 1. Load configuration fresh for this call
        let (event, rules) =
            match load_event_rules(input.company_id, input.code, active_event, active_rules) {
                Ok(loaded) => loaded,
                Err(err) => return Err(Self::abort(&mut trace, err)),
            };
        trace.info(format!(
            "loaded event {} with {} active rules",
            event.code,
            rules.len()
        ));

        // 2. Period must be open
        let period = get_or_open_period(input.company_id, input.date.year(), input.date.month());
        if !period.allows_posting() {
            let err = EngineError::ClosedPeriod {
                year: period.year,
                month: period.month,
            };
            return Err(Self::abort(&mut trace, err));
        }
        trace.info(format!("period {}-{:02} is open", period.year, period.month));

        // 3. Filter rules by condition, preserving order
        let mut applicable = Vec::with_capacity(rules.len());
        for rule in &rules {
            let applies = match &rule.condition {
                None => true,
                Some(raw) => {
                    match Condition::parse(raw)
                        .and_then(|condition| condition.evaluate(&input.operation))
                    {
                        Ok(applies) => applies,
                        Err(err) => return Err(Self::abort(&mut trace, err)),
                    }
                }
            };
            if applies {
                trace.info(format!("rule {} applies", rule.order));
                applicable.push(rule);
            } else {
                trace.info(format!("rule {} skipped by condition", rule.order));
            }
        }
        if applicable.is_empty() {
            trace.warning("all rules were filtered out by their conditions");
            return Err(Self::abort(&mut trace, EngineError::NoLines));
        }

        // 4. Resolve each applicable rule to a posting line
        let mut lines = Vec::with_capacity(applicable.len());
        for rule in applicable {
            match check_family_guard(event.code, rule.role, config.strict_guards) {
                Ok(GuardCheck::Allowed) => {}
                Ok(GuardCheck::Relaxed) => trace.warning(format!(
                    "rule {} posts to {} despite the {:?}-family guard (non-strict mode)",
                    rule.order,
                    rule.role,
                    event.code.family()
                )),
                Err(err) => return Err(Self::abort(&mut trace, err)),
            }

            let account = match resolve_role_account(
                input.company_id,
                rule.role,
                &active_mapping,
                &account_by_id,
            ) {
                Ok(account) => account,
                Err(err) => return Err(Self::abort(&mut trace, err)),
            };
            if let Err(err) = validate_account_active(&account) {
                return Err(Self::abort(&mut trace, err));
            }

            let amount = resolve_amount(&rule.amount, &input.operation);
            if amount < Decimal::ZERO {
                return Err(Self::abort(&mut trace, EngineError::InvalidLineAmount));
            }
            if amount == Decimal::ZERO {
                trace.warning(format!("rule {} resolved amount 0.00", rule.order));
            }

            let (line, side) = match rule.side {
                Side::Debit => (EntryLine::debit(account.id, amount), "debit"),
                Side::Credit => (EntryLine::credit(account.id, amount), "credit"),
            };
            trace.info(format!(
                "rule {} -> {side} {} (account {})",
                rule.order, rule.role, account.code
            ));
            lines.push(line);
        }

        // 5. Balance law
        let total_debit: Decimal = lines.iter().map(|line| line.debit).sum();
        let total_credit: Decimal = lines.iter().map(|line| line.credit).sum();
        if (total_debit - total_credit).abs() > balance_tolerance() {
            let err = EngineError::UnbalancedEntry {
                debit: total_debit,
                credit: total_credit,
            };
            return Err(Self::abort(&mut trace, err));
        }
        trace.info("entry balanced");

        // 6. Assemble
        let status = match input.origin {
            EntryOrigin::Engine => EntryStatus::Posted,
            EntryOrigin::Manual => EntryStatus::Draft,
        };
        let hash = integrity_hash(input.company_id, input.date, &input.memo, &lines);
        let finished = trace.finish();

        let entry = JournalEntry {
            id: EntryId::new(),
            company_id: input.company_id,
            entry_date: input.date,
            period_id: period.id,
            memo: input.memo.clone(),
            origin: input.origin,
            status,
            lines,
            metadata: finished.to_metadata(),
            integrity_hash: hash,
            reversal_of: None,
            reversed_by: None,
            created_at: Utc::now(),
        };

        Ok(GenerationResult {
            entry,
            trace: finished,
        })
    }

    /// Assembles a manually keyed draft entry.
    ///
    /// Manual entries start as drafts and are posted by a separate
    /// workflow; the engine only validates the line set and stamps the
    /// integrity hash.
    ///
    /// # Errors
    ///
    /// Returns `ClosedPeriod` if the period does not allow posting, or a
    /// line-validation error for a malformed line set.
    pub fn assemble_manual_entry(
        company_id: CompanyId,
        date: NaiveDate,
        period: &Period,
        memo: impl Into<String>,
        lines: Vec<EntryLine>,
    ) -> Result<JournalEntry, EngineError> {
        if !period.allows_posting() {
            return Err(EngineError::ClosedPeriod {
                year: period.year,
                month: period.month,
            });
        }
        validate_manual_lines(&lines)?;

        let memo = memo.into();
        Ok(JournalEntry {
            id: EntryId::new(),
            company_id,
            entry_date: date,
            period_id: period.id,
            integrity_hash: integrity_hash(company_id, date, &memo, &lines),
            memo,
            origin: EntryOrigin::Manual,
            status: EntryStatus::Draft,
            lines,
            metadata: serde_json::Value::Null,
            reversal_of: None,
            reversed_by: None,
            created_at: Utc::now(),
        })
    }

    /// Records the fatal step and hands the error back to the caller.
    fn abort(trace: &mut TraceRecorder, err: EngineError) -> EngineError {
        trace.error(format!("generation aborted: {err} [{}]", err.error_code()));
        err
    }
}
