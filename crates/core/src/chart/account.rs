//! Ledger account domain types.

use libro_shared::types::{AccountId, CompanyId};
use serde::{Deserialize, Serialize};

/// Accounting class of a ledger account.
///
/// Determines the account's role in the accounting equation and which
/// semantic account roles may legally map to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClass {
    /// Resources owned by the company.
    Asset,
    /// Obligations owed to third parties.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Revenue from sales and other sources.
    Income,
    /// Costs incurred in operations.
    Expense,
}

impl std::fmt::Display for AccountClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        };
        write!(f, "{name}")
    }
}

/// A ledger account in a company's chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Company this account belongs to.
    pub company_id: CompanyId,
    /// Account code (e.g., "4212" for trade payables in the Peruvian PCGE).
    pub code: String,
    /// Human-readable account name.
    pub name: String,
    /// Accounting class.
    pub class: AccountClass,
    /// Whether the account accepts new postings.
    pub is_active: bool,
}
