//! Semantic account roles.
//!
//! Posting rules never name concrete accounts. They name a *role* (e.g.
//! `ACCOUNTS_PAYABLE`) which each company maps to one of its own ledger
//! accounts. The role carries a fixed expected accounting class so that a
//! user-editable mapping table cannot silently point a role at an account
//! of the wrong class.

use serde::{Deserialize, Serialize};

use super::account::AccountClass;

/// Semantic account role referenced by posting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    /// Cash on hand.
    Cash,
    /// Bank current accounts.
    Bank,
    /// Trade receivables.
    AccountsReceivable,
    /// Goods held for sale.
    Inventory,
    /// IGV input credit (VAT paid on purchases).
    VatCredit,
    /// Trade payables.
    AccountsPayable,
    /// IGV output debit (VAT charged on sales).
    VatDebit,
    /// Share capital.
    Capital,
    /// Legal and voluntary reserves.
    Reserves,
    /// Accumulated results.
    RetainedEarnings,
    /// Revenue from sales.
    SalesIncome,
    /// Non-operating income.
    OtherIncome,
    /// Purchases of goods and services.
    PurchaseExpense,
    /// Cost of goods sold.
    CostOfSales,
    /// Non-operating expenses.
    OtherExpense,
}

impl AccountRole {
    /// Returns the accounting class an account mapped to this role must have.
    #[must_use]
    pub fn expected_class(&self) -> AccountClass {
        match self {
            Self::Cash
            | Self::Bank
            | Self::AccountsReceivable
            | Self::Inventory
            | Self::VatCredit => AccountClass::Asset,
            Self::AccountsPayable | Self::VatDebit => AccountClass::Liability,
            Self::Capital | Self::Reserves | Self::RetainedEarnings => AccountClass::Equity,
            Self::SalesIncome | Self::OtherIncome => AccountClass::Income,
            Self::PurchaseExpense | Self::CostOfSales | Self::OtherExpense => AccountClass::Expense,
        }
    }

    /// Returns the wire name used in rule definitions and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Bank => "BANK",
            Self::AccountsReceivable => "ACCOUNTS_RECEIVABLE",
            Self::Inventory => "INVENTORY",
            Self::VatCredit => "VAT_CREDIT",
            Self::AccountsPayable => "ACCOUNTS_PAYABLE",
            Self::VatDebit => "VAT_DEBIT",
            Self::Capital => "CAPITAL",
            Self::Reserves => "RESERVES",
            Self::RetainedEarnings => "RETAINED_EARNINGS",
            Self::SalesIncome => "SALES_INCOME",
            Self::OtherIncome => "OTHER_INCOME",
            Self::PurchaseExpense => "PURCHASE_EXPENSE",
            Self::CostOfSales => "COST_OF_SALES",
            Self::OtherExpense => "OTHER_EXPENSE",
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH" => Ok(Self::Cash),
            "BANK" => Ok(Self::Bank),
            "ACCOUNTS_RECEIVABLE" => Ok(Self::AccountsReceivable),
            "INVENTORY" => Ok(Self::Inventory),
            "VAT_CREDIT" => Ok(Self::VatCredit),
            "ACCOUNTS_PAYABLE" => Ok(Self::AccountsPayable),
            "VAT_DEBIT" => Ok(Self::VatDebit),
            "CAPITAL" => Ok(Self::Capital),
            "RESERVES" => Ok(Self::Reserves),
            "RETAINED_EARNINGS" => Ok(Self::RetainedEarnings),
            "SALES_INCOME" => Ok(Self::SalesIncome),
            "OTHER_INCOME" => Ok(Self::OtherIncome),
            "PURCHASE_EXPENSE" => Ok(Self::PurchaseExpense),
            "COST_OF_SALES" => Ok(Self::CostOfSales),
            "OTHER_EXPENSE" => Ok(Self::OtherExpense),
            _ => Err(format!("Unknown account role: {s}")),
        }
    }
}
