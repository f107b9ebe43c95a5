//! Accounting event definitions and cross-event guard data.

use libro_shared::types::{CompanyId, EventId};
use serde::{Deserialize, Serialize};

use crate::chart::AccountRole;

/// Business event type codes the engine can post for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCode {
    /// Sale of goods or services.
    Sale,
    /// Credit note issued against a sale.
    SaleCreditNote,
    /// Debit note issued against a sale.
    SaleDebitNote,
    /// Purchase of goods or services.
    Purchase,
    /// Credit note received against a purchase.
    PurchaseCreditNote,
    /// Debit note received against a purchase.
    PurchaseDebitNote,
    /// Return of purchased goods.
    PurchaseReturn,
    /// Outgoing payment.
    Payment,
    /// Incoming collection.
    Collection,
    /// Outgoing payment in cash.
    PaymentCash,
    /// Outgoing payment through a bank.
    PaymentBank,
    /// Incoming collection in cash.
    CollectionCash,
    /// Incoming collection through a bank.
    CollectionBank,
    /// Goods entering inventory.
    InventoryIn,
    /// Goods leaving inventory.
    InventoryOut,
    /// Manually keyed adjustment entry.
    Manual,
}

/// Family an event code belongs to, used by the invariant guard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFamily {
    /// Sale-side documents.
    Sale,
    /// Purchase-side documents.
    Purchase,
    /// Payments and collections.
    Treasury,
    /// Inventory movements.
    Inventory,
    /// Manual and adjustment entries.
    Other,
}

impl EventCode {
    /// Returns the family this event code belongs to.
    #[must_use]
    pub fn family(&self) -> EventFamily {
        match self {
            Self::Sale | Self::SaleCreditNote | Self::SaleDebitNote => EventFamily::Sale,
            Self::Purchase
            | Self::PurchaseCreditNote
            | Self::PurchaseDebitNote
            | Self::PurchaseReturn => EventFamily::Purchase,
            Self::Payment
            | Self::Collection
            | Self::PaymentCash
            | Self::PaymentBank
            | Self::CollectionCash
            | Self::CollectionBank => EventFamily::Treasury,
            Self::InventoryIn | Self::InventoryOut => EventFamily::Inventory,
            Self::Manual => EventFamily::Other,
        }
    }

    /// Returns the wire name of this event code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::SaleCreditNote => "SALE_CREDIT_NOTE",
            Self::SaleDebitNote => "SALE_DEBIT_NOTE",
            Self::Purchase => "PURCHASE",
            Self::PurchaseCreditNote => "PURCHASE_CREDIT_NOTE",
            Self::PurchaseDebitNote => "PURCHASE_DEBIT_NOTE",
            Self::PurchaseReturn => "PURCHASE_RETURN",
            Self::Payment => "PAYMENT",
            Self::Collection => "COLLECTION",
            Self::PaymentCash => "PAYMENT_CASH",
            Self::PaymentBank => "PAYMENT_BANK",
            Self::CollectionCash => "COLLECTION_CASH",
            Self::CollectionBank => "COLLECTION_BANK",
            Self::InventoryIn => "INVENTORY_IN",
            Self::InventoryOut => "INVENTORY_OUT",
            Self::Manual => "MANUAL",
        }
    }
}

impl std::fmt::Display for EventCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SALE" => Ok(Self::Sale),
            "SALE_CREDIT_NOTE" => Ok(Self::SaleCreditNote),
            "SALE_DEBIT_NOTE" => Ok(Self::SaleDebitNote),
            "PURCHASE" => Ok(Self::Purchase),
            "PURCHASE_CREDIT_NOTE" => Ok(Self::PurchaseCreditNote),
            "PURCHASE_DEBIT_NOTE" => Ok(Self::PurchaseDebitNote),
            "PURCHASE_RETURN" => Ok(Self::PurchaseReturn),
            "PAYMENT" => Ok(Self::Payment),
            "COLLECTION" => Ok(Self::Collection),
            "PAYMENT_CASH" => Ok(Self::PaymentCash),
            "PAYMENT_BANK" => Ok(Self::PaymentBank),
            "COLLECTION_CASH" => Ok(Self::CollectionCash),
            "COLLECTION_BANK" => Ok(Self::CollectionBank),
            "INVENTORY_IN" => Ok(Self::InventoryIn),
            "INVENTORY_OUT" => Ok(Self::InventoryOut),
            "MANUAL" => Ok(Self::Manual),
            _ => Err(format!("Unknown event code: {s}")),
        }
    }
}

/// Roles a sale-family event must never post to.
const SALE_FORBIDDEN: &[AccountRole] = &[AccountRole::VatCredit];

/// Roles a purchase-family event must never post to.
const PURCHASE_FORBIDDEN: &[AccountRole] = &[AccountRole::VatDebit];

/// Roles a treasury event must never post to.
///
/// Payments and collections settle existing documents; they never touch VAT,
/// income, or expense accounts themselves.
const TREASURY_FORBIDDEN: &[AccountRole] = &[
    AccountRole::VatCredit,
    AccountRole::VatDebit,
    AccountRole::SalesIncome,
    AccountRole::OtherIncome,
    AccountRole::PurchaseExpense,
    AccountRole::CostOfSales,
    AccountRole::OtherExpense,
];

impl EventFamily {
    /// Returns the roles this family must never post to.
    ///
    /// The mapping table is user-editable per company; this table is fixed
    /// engine data so a bad mapping cannot change the meaning of the chart.
    #[must_use]
    pub fn forbidden_roles(&self) -> &'static [AccountRole] {
        match self {
            Self::Sale => SALE_FORBIDDEN,
            Self::Purchase => PURCHASE_FORBIDDEN,
            Self::Treasury => TREASURY_FORBIDDEN,
            Self::Inventory | Self::Other => &[],
        }
    }

    /// Returns true if this family's guard may be relaxed in non-strict mode.
    ///
    /// Only the treasury guard is relaxable. The sale/purchase VAT guards
    /// protect tax accounts and always fail hard.
    #[must_use]
    pub fn guard_is_relaxable(&self) -> bool {
        matches!(self, Self::Treasury)
    }
}

/// An accounting event definition for one company.
///
/// Configuration data: created by seeding, mutated only by administrators,
/// deactivated rather than deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountingEvent {
    /// Unique identifier.
    pub id: EventId,
    /// Company this event definition belongs to.
    pub company_id: CompanyId,
    /// Event type code.
    pub code: EventCode,
    /// Human-readable name.
    pub name: String,
    /// Reporting category (e.g., "ventas", "compras", "tesoreria").
    pub category: String,
    /// Whether the event can be generated.
    pub is_active: bool,
}
