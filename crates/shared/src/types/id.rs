//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `CompanyId` where an `AccountId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(CompanyId, "Unique identifier for a company.");
typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(EventId, "Unique identifier for an accounting event definition.");
typed_id!(RuleId, "Unique identifier for a posting rule.");
typed_id!(MappingId, "Unique identifier for an account role mapping.");
typed_id!(PeriodId, "Unique identifier for an accounting period.");
typed_id!(EntryId, "Unique identifier for a journal entry.");
typed_id!(LineId, "Unique identifier for a journal entry line.");
typed_id!(RunId, "Unique identifier for an engine generation run.");
