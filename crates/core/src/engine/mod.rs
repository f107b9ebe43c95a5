//! The journal-entry generation engine ("Motor de Asientos").
//!
//! This module turns business events into balanced journal entries:
//! - Operation data supplied by the calling module
//! - Event and posting-rule configuration loading
//! - Restricted condition interpretation
//! - Amount resolution
//! - Role-to-account mapping with invariant guards
//! - Balanced entry assembly with integrity hashing
//! - Manual entry validation and posted-entry reversal
//! - Structured run traces for auditability

pub mod amount;
pub mod condition;
pub mod entry;
pub mod error;
pub mod event;
pub mod mapping;
pub mod operation;
pub mod reversal;
pub mod rule;
pub mod service;
pub mod store;
pub mod trace;
pub mod validation;

#[cfg(test)]
mod condition_props;
#[cfg(test)]
mod service_props;

pub use amount::{resolve_amount, FIELD_BASE, FIELD_TOTAL, FIELD_VAT};
pub use condition::{CmpOp, Condition, Literal};
pub use entry::{
    canonical_posting_string, integrity_hash, EntryLine, EntryOrigin, EntryStatus, JournalEntry,
};
pub use error::EngineError;
pub use event::{AccountingEvent, EventCode, EventFamily};
pub use mapping::{check_family_guard, resolve_role_account, validate_account_active, GuardCheck};
pub use operation::{FieldValue, OperationData};
pub use reversal::reverse_entry;
pub use rule::{AccountRoleMapping, AmountKind, PostingRule, Side};
pub use service::{EngineService, GenerateInput, GenerationResult};
pub use store::load_event_rules;
pub use trace::{GenerationTrace, TraceLevel, TraceRecorder, TraceStep};
pub use validation::validate_manual_lines;
