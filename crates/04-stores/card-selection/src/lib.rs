//! Card/rule selection state machine and its three store variants.
//!
//! Scan results are grouped into rule cards; users expand/collapse rule
//! groups, select individual cards, and gate all highlighting behind the
//! visual helper. Every transition lives in [`ops`] as a pure copy-on-write
//! function, so the three stores (automated checks, needs review, assessment)
//! share one transition table and stay behaviorally identical.

mod actions;
mod assessment;
mod creator;
mod data;
pub mod ops;
mod store;

pub use actions::{
    AssessmentCardSelectionActions, CardSelectionActions, ScanResultActions, TabActions,
};
pub use assessment::AssessmentCardSelectionStore;
pub use data::{
    AssessmentCardSelectionStoreData, CardSelectionStoreData, RuleExpandCollapseData,
};
pub use creator::{
    register_assessment_callbacks, register_card_selection_callbacks,
    register_needs_review_callbacks, register_scan_result_callbacks, register_tab_callbacks,
};
pub use store::{CardSelectionStore, NeedsReviewCardSelectionStore};
