//! Stable identifiers for every store in the system.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of store identities; doubles as the persistence key namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreName {
    /// Automated-checks card selection state for one target page.
    CardSelectionStore,
    /// Needs-review (incomplete result) card selection state for one target.
    NeedsReviewCardSelectionStore,
    /// Assessment card selection state, keyed by sub-test.
    AssessmentCardSelectionStore,
}

impl StoreName {
    /// Fixed namespace segment used to build durable storage keys.
    pub fn key_segment(self) -> &'static str {
        match self {
            StoreName::CardSelectionStore => "cardSelection",
            StoreName::NeedsReviewCardSelectionStore => "needsReviewCardSelection",
            StoreName::AssessmentCardSelectionStore => "assessmentCardSelection",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_segment())
    }
}
