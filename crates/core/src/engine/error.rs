//! Engine error taxonomy.
//!
//! Every variant is a non-retryable domain error surfaced verbatim to the
//! caller. The engine never guesses a fallback account and never persists a
//! partial entry; the caller owns user-facing messaging and decides whether
//! to retry after fixing configuration.

use libro_shared::types::CompanyId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::EntryStatus;
use super::event::EventCode;
use crate::chart::{AccountClass, AccountRole};

/// Errors that can occur during journal-entry generation.
#[derive(Debug, Error)]
pub enum EngineError {
    // ========== Event Configuration Errors ==========
    /// No active accounting event of this type for the company.
    #[error("No active accounting event {code} for company {company_id}")]
    EventNotFound {
        /// The company requesting generation.
        company_id: CompanyId,
        /// The requested event type code.
        code: EventCode,
    },

    /// The event has no active posting rules.
    #[error("Accounting event {code} has no active posting rules")]
    EventHasNoRules {
        /// The event type code.
        code: EventCode,
    },

    /// A rule condition could not be parsed or evaluated.
    #[error("Cannot evaluate condition \"{condition}\": {reason}")]
    ConditionEvaluation {
        /// The raw condition expression.
        condition: String,
        /// Why parsing or evaluation failed.
        reason: String,
    },

    // ========== Mapping Errors ==========
    /// No active account mapping for the role in this company.
    #[error("No active account mapped to role {role} for company {company_id}")]
    AccountNotMapped {
        /// The company requesting generation.
        company_id: CompanyId,
        /// The unmapped semantic role.
        role: AccountRole,
    },

    /// The mapped account's class does not match the role's expected class.
    #[error(
        "Role {role} requires a {expected} account but {account_code} is {actual}"
    )]
    InvalidMapping {
        /// The semantic role.
        role: AccountRole,
        /// The class the role requires.
        expected: AccountClass,
        /// The class of the mapped account.
        actual: AccountClass,
        /// Code of the mapped account.
        account_code: String,
    },

    /// A cross-event invariant guard was violated.
    #[error("Event {event} must never post to role {role}")]
    InvariantViolation {
        /// The event being generated.
        event: EventCode,
        /// The forbidden role a rule tried to use.
        role: AccountRole,
    },

    // ========== Posting Validation Errors ==========
    /// The mapped account is inactive.
    #[error("Account {account_code} is inactive")]
    InactiveAccount {
        /// Code of the inactive account.
        account_code: String,
    },

    /// The accounting period is closed.
    #[error("Period {year}-{month:02} is closed, no posting allowed")]
    ClosedPeriod {
        /// Period year.
        year: i32,
        /// Period month.
        month: u32,
    },

    /// The assembled lines do not balance within tolerance.
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    // ========== Entry State Errors ==========
    /// The requested status transition is not allowed.
    #[error("Cannot transition entry from {from:?} to {to:?}")]
    InvalidStateTransition {
        /// Current entry status.
        from: EntryStatus,
        /// Requested entry status.
        to: EntryStatus,
    },

    // ========== Manual Entry Validation Errors ==========
    /// A manual entry must have at least one line.
    #[error("Entry must have at least one line")]
    NoLines,

    /// A manual entry must have both debit and credit lines.
    #[error("Entry must have both debit and credit lines")]
    SingleSided,

    /// A line must carry a positive amount on exactly one side.
    #[error("Each line must carry a positive amount on exactly one side")]
    InvalidLineAmount,
}

impl EngineError {
    /// Returns the error code for API responses and audit records.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EventNotFound { .. } => "EVENT_NOT_FOUND",
            Self::EventHasNoRules { .. } => "EVENT_HAS_NO_RULES",
            Self::ConditionEvaluation { .. } => "CONDITION_EVALUATION_ERROR",
            Self::AccountNotMapped { .. } => "ACCOUNT_NOT_MAPPED",
            Self::InvalidMapping { .. } => "INVALID_MAPPING",
            Self::InvariantViolation { .. } => "INVARIANT_VIOLATION",
            Self::InactiveAccount { .. } => "INACTIVE_ACCOUNT",
            Self::ClosedPeriod { .. } => "CLOSED_PERIOD",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::NoLines => "NO_LINES",
            Self::SingleSided => "SINGLE_SIDED",
            Self::InvalidLineAmount => "INVALID_LINE_AMOUNT",
        }
    }

    /// Returns true if fixing company configuration could make a retry succeed.
    ///
    /// Distinguishes configuration defects (missing mapping, closed period)
    /// from defects in the rule set or engine input.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound { .. }
                | Self::EventHasNoRules { .. }
                | Self::AccountNotMapped { .. }
                | Self::InvalidMapping { .. }
                | Self::InactiveAccount { .. }
                | Self::ClosedPeriod { .. }
        )
    }
}
