//! Journal entry aggregate and integrity hashing.

use chrono::{DateTime, NaiveDate, Utc};
use libro_shared::types::money::balance_tolerance;
use libro_shared::types::{AccountId, CompanyId, EntryId, LineId, PeriodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Status of a journal entry.
///
/// `Draft -> Posted -> Reversed`. Posted and Reversed entries are immutable
/// except for the status and reversal-link fields; a reversal is a new,
/// linked entry, never an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry has been posted to the ledger.
    Posted,
    /// Entry has been reversed by a linked reversing entry.
    Reversed,
}

impl EntryStatus {
    /// Returns true if line content can still change.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if line content is frozen.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

/// Who produced a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    /// Generated by the journal-entry engine.
    Engine,
    /// Keyed manually by a user.
    Manual,
}

/// A single posting line of a journal entry.
///
/// Exactly one of `debit`/`credit` is nonzero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLine {
    /// Unique identifier.
    pub id: LineId,
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit amount (0 if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (0 if this is a debit line).
    pub credit: Decimal,
}

impl EntryLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            id: LineId::new(),
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            id: LineId::new(),
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// A journal entry: the terminal output of one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// Company this entry belongs to.
    pub company_id: CompanyId,
    /// Posting date.
    pub entry_date: NaiveDate,
    /// Period the entry is recorded in.
    pub period_id: PeriodId,
    /// Free-text narrative (glosa).
    pub memo: String,
    /// Who produced the entry.
    pub origin: EntryOrigin,
    /// Current status.
    pub status: EntryStatus,
    /// Posting lines, in rule order.
    pub lines: Vec<EntryLine>,
    /// Structured run metadata (audit trace).
    pub metadata: serde_json::Value,
    /// Hash over the canonical serialization, for tamper detection.
    pub integrity_hash: String,
    /// Entry this one reverses, if any.
    pub reversal_of: Option<EntryId>,
    /// Entry that reversed this one, if any.
    pub reversed_by: Option<EntryId>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Sum of all debit amounts.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit).sum()
    }

    /// Sum of all credit amounts.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|line| line.credit).sum()
    }

    /// Returns true if debits equal credits within the 1-cent tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        (self.total_debit() - self.total_credit()).abs() <= balance_tolerance()
    }

    /// Posts a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the entry is a draft.
    pub fn post(&mut self) -> Result<(), EngineError> {
        match self.status {
            EntryStatus::Draft => {
                self.status = EntryStatus::Posted;
                Ok(())
            }
            from => Err(EngineError::InvalidStateTransition {
                from,
                to: EntryStatus::Posted,
            }),
        }
    }

    /// Marks a posted entry as reversed by the given entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the entry is posted.
    pub fn mark_reversed(&mut self, reversed_by: EntryId) -> Result<(), EngineError> {
        match self.status {
            EntryStatus::Posted => {
                self.status = EntryStatus::Reversed;
                self.reversed_by = Some(reversed_by);
                Ok(())
            }
            from => Err(EngineError::InvalidStateTransition {
                from,
                to: EntryStatus::Reversed,
            }),
        }
    }

    /// Recomputes the canonical hash and compares it to the stored one.
    #[must_use]
    pub fn verify_integrity(&self) -> bool {
        integrity_hash(self.company_id, self.entry_date, &self.memo, &self.lines)
            == self.integrity_hash
    }
}

/// Builds the canonical serialization an entry is hashed over.
///
/// Covers (company, date, memo, ordered lines) with amounts normalized to
/// 2 decimal places, so identical inputs always hash identically.
#[must_use]
pub fn canonical_posting_string(
    company_id: CompanyId,
    entry_date: NaiveDate,
    memo: &str,
    lines: &[EntryLine],
) -> String {
    use std::fmt::Write as _;

    let mut canonical = format!("{company_id}|{entry_date}|{memo}");
    for line in lines {
        let _ = write!(
            canonical,
            "|{}:{:.2}:{:.2}",
            line.account_id, line.debit, line.credit
        );
    }
    canonical
}

/// Computes the integrity hash of an entry's canonical serialization.
#[must_use]
pub fn integrity_hash(
    company_id: CompanyId,
    entry_date: NaiveDate,
    memo: &str,
    lines: &[EntryLine],
) -> String {
    let canonical = canonical_posting_string(company_id, entry_date, memo, lines);
    hex::encode(blake3::hash(canonical.as_bytes()).as_bytes())
}
