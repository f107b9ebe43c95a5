//! Accounting period types.
//!
//! Periods are owned by the period-management module. The engine requests
//! "get-or-open" from that collaborator and only reads the resulting status.

use chrono::{Datelike, NaiveDate};
use libro_shared::types::{CompanyId, PeriodId};
use serde::{Deserialize, Serialize};

/// Status of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for postings.
    Open,
    /// Period is closed, no new postings allowed.
    Closed,
}

/// A monthly accounting period within a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    /// Unique identifier.
    pub id: PeriodId,
    /// Company this period belongs to.
    pub company_id: CompanyId,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Current status.
    pub status: PeriodStatus,
}

impl Period {
    /// Returns true if postings can be recorded in this period.
    #[must_use]
    pub fn allows_posting(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_period(status: PeriodStatus) -> Period {
        Period {
            id: PeriodId::new(),
            company_id: CompanyId::new(),
            year: 2026,
            month: 3,
            status,
        }
    }

    #[test]
    fn test_open_period_allows_posting() {
        assert!(make_period(PeriodStatus::Open).allows_posting());
    }

    #[test]
    fn test_closed_period_rejects_posting() {
        assert!(!make_period(PeriodStatus::Closed).allows_posting());
    }

    #[test]
    fn test_contains_date() {
        let period = make_period(PeriodStatus::Open);
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    }
}
