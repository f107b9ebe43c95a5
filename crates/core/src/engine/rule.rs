//! Posting rule definitions.

use libro_shared::types::{AccountId, CompanyId, EventId, MappingId, RuleId};
use serde::{Deserialize, Serialize};

use crate::chart::AccountRole;

/// Side of a double-entry posting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

/// Which operation-data amount a rule posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountKind {
    /// Taxable base amount (`base` field).
    Base,
    /// IGV amount (`igv` field).
    Vat,
    /// Document total (`total` field).
    Total,
    /// A named custom field of the operation data.
    Custom(String),
}

/// A single posting rule of an accounting event.
///
/// Rules of an event are evaluated in ascending `order`; that order also
/// determines line order in the generated entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingRule {
    /// Unique identifier.
    pub id: RuleId,
    /// Event this rule belongs to.
    pub event_id: EventId,
    /// Execution order, unique ascending per event.
    pub order: u32,
    /// Side of the resulting line.
    pub side: Side,
    /// Semantic account role the line posts to.
    pub role: AccountRole,
    /// Amount the line carries.
    pub amount: AmountKind,
    /// Optional boolean condition over operation-data fields.
    ///
    /// Absent means the rule always applies.
    pub condition: Option<String>,
    /// Whether the rule participates in generation.
    pub is_active: bool,
}

impl PostingRule {
    /// Convenience constructor for an always-applicable active rule.
    #[must_use]
    pub fn unconditional(
        event_id: EventId,
        order: u32,
        side: Side,
        role: AccountRole,
        amount: AmountKind,
    ) -> Self {
        Self {
            id: RuleId::new(),
            event_id,
            order,
            side,
            role,
            amount,
            condition: None,
            is_active: true,
        }
    }
}

/// Maps one semantic account role to a concrete ledger account for a company.
///
/// At most one active mapping exists per (company, role); the repository
/// collaborator upholds that uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRoleMapping {
    /// Unique identifier.
    pub id: MappingId,
    /// Company this mapping belongs to.
    pub company_id: CompanyId,
    /// The semantic role being mapped.
    pub role: AccountRole,
    /// The concrete ledger account.
    pub account_id: AccountId,
    /// Whether the mapping is in force.
    pub is_active: bool,
}
