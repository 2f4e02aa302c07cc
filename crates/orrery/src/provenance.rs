use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an instant returned by the engine was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// A bounded ephemeris search found the instant.
    Searched,
    /// The search came back empty and a fixed estimate was substituted.
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchedInstant {
    pub at: DateTime<Utc>,
    pub provenance: Provenance,
}

impl SearchedInstant {
    pub fn searched(at: DateTime<Utc>) -> Self {
        Self {
            at,
            provenance: Provenance::Searched,
        }
    }

    pub fn estimated(at: DateTime<Utc>) -> Self {
        Self {
            at,
            provenance: Provenance::Estimated,
        }
    }

    pub fn is_estimated(&self) -> bool {
        self.provenance == Provenance::Estimated
    }
}
