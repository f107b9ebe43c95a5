//! Reversal of posted journal entries.
//!
//! A reversal never edits the original entry's lines. It creates a new,
//! linked entry with debits and credits swapped, and transitions the
//! original to `Reversed` with a back-link.

use chrono::{NaiveDate, Utc};
use libro_shared::types::{EntryId, PeriodId};
use serde::{Deserialize, Serialize};

use super::entry::{integrity_hash, EntryLine, EntryStatus, JournalEntry};
use super::error::EngineError;

/// Swaps the sides of a line set, preserving order and amounts.
fn swap_sides(lines: &[EntryLine]) -> Vec<EntryLine> {
    lines
        .iter()
        .map(|line| {
            if line.debit > line.credit {
                EntryLine::credit(line.account_id, line.debit)
            } else {
                EntryLine::debit(line.account_id, line.credit)
            }
        })
        .collect()
}

/// Metadata attached to a reversing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReversalNote {
    reversal_of: EntryId,
    reason: String,
}

/// Reverses a posted entry.
///
/// Builds the linked reversing entry (posted immediately, same lines with
/// sides swapped), transitions the original to `Reversed`, and links the
/// two. The reversing entry may land in a different period than the
/// original (e.g. when the original period has since closed).
///
/// # Errors
///
/// Returns `InvalidStateTransition` unless the original is `Posted`.
pub fn reverse_entry(
    original: &mut JournalEntry,
    date: NaiveDate,
    period_id: PeriodId,
    reason: &str,
) -> Result<JournalEntry, EngineError> {
    if original.status != EntryStatus::Posted {
        return Err(EngineError::InvalidStateTransition {
            from: original.status,
            to: EntryStatus::Reversed,
        });
    }

    let lines = swap_sides(&original.lines);
    let memo = format!("Reversal of entry {}. Reason: {}", original.id, reason);
    let note = ReversalNote {
        reversal_of: original.id,
        reason: reason.to_string(),
    };

    let reversing = JournalEntry {
        id: EntryId::new(),
        company_id: original.company_id,
        entry_date: date,
        period_id,
        integrity_hash: integrity_hash(original.company_id, date, &memo, &lines),
        memo,
        origin: original.origin,
        status: EntryStatus::Posted,
        lines,
        metadata: serde_json::to_value(&note).unwrap_or(serde_json::Value::Null),
        reversal_of: Some(original.id),
        reversed_by: None,
        created_at: Utc::now(),
    };

    original.mark_reversed(reversing.id)?;

    Ok(reversing)
}
