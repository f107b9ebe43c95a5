//! Role-to-account resolution and mapping invariants.
//!
//! The per-company mapping table is user-editable configuration. Everything
//! here exists to stop a bad mapping from silently corrupting the meaning of
//! the chart of accounts: the role's expected class is cross-checked against
//! the mapped account, and the event-family guard table is enforced
//! independently of company configuration.

use libro_shared::types::{AccountId, CompanyId};

use super::error::EngineError;
use super::event::EventCode;
use super::rule::AccountRoleMapping;
use crate::chart::{Account, AccountRole};

/// Outcome of a family guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardCheck {
    /// The role is allowed for this event family.
    Allowed,
    /// The role is forbidden, but non-strict mode demotes it to a warning.
    Relaxed,
}

/// Checks the cross-event invariant guard for one rule.
///
/// Guards are static engine data keyed by event family (see
/// `EventFamily::forbidden_roles`). In non-strict mode the treasury guard is
/// demoted to a warning; the sale/purchase VAT guards always fail hard.
///
/// # Errors
///
/// Returns `InvariantViolation` when the role is forbidden for the family
/// and the guard is not relaxed.
pub fn check_family_guard(
    event: EventCode,
    role: AccountRole,
    strict_guards: bool,
) -> Result<GuardCheck, EngineError> {
    let family = event.family();
    if !family.forbidden_roles().contains(&role) {
        return Ok(GuardCheck::Allowed);
    }

    if !strict_guards && family.guard_is_relaxable() {
        return Ok(GuardCheck::Relaxed);
    }

    Err(EngineError::InvariantViolation { event, role })
}

/// Resolves a semantic role to the company's concrete ledger account.
///
/// # Errors
///
/// * `AccountNotMapped` if the company has no active mapping for the role,
///   or the mapping points at an account the repository cannot find.
/// * `InvalidMapping` if the mapped account's class does not match the
///   role's expected class.
pub fn resolve_role_account<Ma, Ac>(
    company_id: CompanyId,
    role: AccountRole,
    active_mapping: Ma,
    account_by_id: Ac,
) -> Result<Account, EngineError>
where
    Ma: Fn(CompanyId, AccountRole) -> Option<AccountRoleMapping>,
    Ac: Fn(AccountId) -> Option<Account>,
{
    let mapping = active_mapping(company_id, role)
        .filter(|mapping| mapping.is_active)
        .ok_or(EngineError::AccountNotMapped { company_id, role })?;

    // A mapping pointing at a vanished account is the same configuration
    // defect as a missing mapping.
    let account = account_by_id(mapping.account_id)
        .ok_or(EngineError::AccountNotMapped { company_id, role })?;

    let expected = role.expected_class();
    if account.class != expected {
        return Err(EngineError::InvalidMapping {
            role,
            expected,
            actual: account.class,
            account_code: account.code,
        });
    }

    Ok(account)
}

/// Validates that a resolved account accepts postings.
///
/// # Errors
///
/// Returns `InactiveAccount` if the account has been deactivated.
pub fn validate_account_active(account: &Account) -> Result<(), EngineError> {
    if !account.is_active {
        return Err(EngineError::InactiveAccount {
            account_code: account.code.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::AccountClass;
    use libro_shared::types::MappingId;

    fn make_account(company_id: CompanyId, class: AccountClass, is_active: bool) -> Account {
        Account {
            id: AccountId::new(),
            company_id,
            code: "4212".to_string(),
            name: "Facturas por pagar".to_string(),
            class,
            is_active,
        }
    }

    fn make_mapping(company_id: CompanyId, role: AccountRole, account_id: AccountId) -> AccountRoleMapping {
        AccountRoleMapping {
            id: MappingId::new(),
            company_id,
            role,
            account_id,
            is_active: true,
        }
    }

    #[test]
    fn test_resolve_valid_mapping() {
        let company_id = CompanyId::new();
        let account = make_account(company_id, AccountClass::Liability, true);
        let mapping = make_mapping(company_id, AccountRole::AccountsPayable, account.id);

        let resolved = resolve_role_account(
            company_id,
            AccountRole::AccountsPayable,
            |_, _| Some(mapping.clone()),
            |_| Some(account.clone()),
        )
        .unwrap();

        assert_eq!(resolved.id, account.id);
    }

    #[test]
    fn test_missing_mapping_fails() {
        let result = resolve_role_account(
            CompanyId::new(),
            AccountRole::VatCredit,
            |_, _| None,
            |_| -> Option<Account> { None },
        );
        assert!(matches!(result, Err(EngineError::AccountNotMapped { .. })));
    }

    #[test]
    fn test_inactive_mapping_fails() {
        let company_id = CompanyId::new();
        let account = make_account(company_id, AccountClass::Asset, true);
        let mut mapping = make_mapping(company_id, AccountRole::Cash, account.id);
        mapping.is_active = false;

        let result = resolve_role_account(
            company_id,
            AccountRole::Cash,
            |_, _| Some(mapping.clone()),
            |_| Some(account.clone()),
        );
        assert!(matches!(result, Err(EngineError::AccountNotMapped { .. })));
    }

    #[test]
    fn test_dangling_account_fails_as_not_mapped() {
        let company_id = CompanyId::new();
        let mapping = make_mapping(company_id, AccountRole::Bank, AccountId::new());

        let result = resolve_role_account(
            company_id,
            AccountRole::Bank,
            |_, _| Some(mapping.clone()),
            |_| None,
        );
        assert!(matches!(result, Err(EngineError::AccountNotMapped { .. })));
    }

    #[test]
    fn test_class_mismatch_fails() {
        let company_id = CompanyId::new();
        // ACCOUNTS_RECEIVABLE expects an ASSET account
        let account = make_account(company_id, AccountClass::Liability, true);
        let mapping = make_mapping(company_id, AccountRole::AccountsReceivable, account.id);

        let result = resolve_role_account(
            company_id,
            AccountRole::AccountsReceivable,
            |_, _| Some(mapping.clone()),
            |_| Some(account.clone()),
        );

        match result {
            Err(EngineError::InvalidMapping { expected, actual, .. }) => {
                assert_eq!(expected, AccountClass::Asset);
                assert_eq!(actual, AccountClass::Liability);
            }
            other => panic!("expected InvalidMapping, got {other:?}"),
        }
    }

    #[test]
    fn test_inactive_account_rejected() {
        let account = make_account(CompanyId::new(), AccountClass::Asset, false);
        assert!(matches!(
            validate_account_active(&account),
            Err(EngineError::InactiveAccount { .. })
        ));
    }

    #[test]
    fn test_sale_guard_blocks_vat_credit() {
        let result = check_family_guard(EventCode::Sale, AccountRole::VatCredit, true);
        assert!(matches!(result, Err(EngineError::InvariantViolation { .. })));

        // Sale/purchase VAT guards are not relaxable
        let result = check_family_guard(EventCode::Sale, AccountRole::VatCredit, false);
        assert!(matches!(result, Err(EngineError::InvariantViolation { .. })));
    }

    #[test]
    fn test_purchase_guard_blocks_vat_debit() {
        let result = check_family_guard(EventCode::PurchaseReturn, AccountRole::VatDebit, true);
        assert!(matches!(result, Err(EngineError::InvariantViolation { .. })));
    }

    #[test]
    fn test_treasury_guard_strict_vs_relaxed() {
        let strict = check_family_guard(EventCode::PaymentBank, AccountRole::SalesIncome, true);
        assert!(matches!(strict, Err(EngineError::InvariantViolation { .. })));

        let relaxed = check_family_guard(EventCode::PaymentBank, AccountRole::SalesIncome, false);
        assert_eq!(relaxed.unwrap(), GuardCheck::Relaxed);
    }

    #[test]
    fn test_allowed_roles_pass() {
        assert_eq!(
            check_family_guard(EventCode::Sale, AccountRole::VatDebit, true).unwrap(),
            GuardCheck::Allowed
        );
        assert_eq!(
            check_family_guard(EventCode::Purchase, AccountRole::VatCredit, true).unwrap(),
            GuardCheck::Allowed
        );
        assert_eq!(
            check_family_guard(EventCode::Payment, AccountRole::Bank, true).unwrap(),
            GuardCheck::Allowed
        );
    }
}
