//! Event and rule loading.
//!
//! Configuration is loaded fresh on every generation call. Caching it across
//! calls would risk acting on stale administrator edits.

use libro_shared::types::{CompanyId, EventId};

use super::error::EngineError;
use super::event::{AccountingEvent, EventCode};
use super::rule::PostingRule;

/// Loads the active event definition and its ordered active rules.
///
/// The two lookups are injected by the caller (normally backed by the
/// rule/mapping repository inside the enclosing transaction).
///
/// # Errors
///
/// * `EventNotFound` if the company has no active event of this type.
/// * `EventHasNoRules` if the event has no active rules.
pub fn load_event_rules<Ev, Ru>(
    company_id: CompanyId,
    code: EventCode,
    active_event: Ev,
    active_rules: Ru,
) -> Result<(AccountingEvent, Vec<PostingRule>), EngineError>
where
    Ev: Fn(CompanyId, EventCode) -> Option<AccountingEvent>,
    Ru: Fn(EventId) -> Vec<PostingRule>,
{
    let event = active_event(company_id, code)
        .filter(|event| event.is_active)
        .ok_or(EngineError::EventNotFound { company_id, code })?;

    let mut rules: Vec<PostingRule> = active_rules(event.id)
        .into_iter()
        .filter(|rule| rule.is_active)
        .collect();

    if rules.is_empty() {
        return Err(EngineError::EventHasNoRules { code });
    }

    // Rule order determines line order in the generated entry.
    rules.sort_by_key(|rule| rule.order);

    Ok((event, rules))
}
