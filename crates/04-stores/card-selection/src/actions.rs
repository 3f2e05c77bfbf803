//! Action collections wired between the interpreter and the stores.
//!
//! Collections are ordinary objects passed through constructors; each scope
//! (automated checks, needs review, assessment) owns its own instances, so
//! nothing here is process-global.

use flux::{AsyncAction, SyncAction};
use messages::{
    AssessmentCardSelectionPayload, AssessmentRuleExpandCollapsePayload, AssessmentScopePayload,
    CardSelectionPayload, RuleExpandCollapsePayload, ScanCompletedPayload,
};

/// Card selection actions for one single-target scope.
///
/// The automated-checks and needs-review scopes each own a separate instance
/// of this collection; they are never shared.
#[derive(Default)]
pub struct CardSelectionActions {
    /// Flip one rule group's expand/collapse state.
    pub toggle_rule_expand_collapse: AsyncAction<RuleExpandCollapsePayload>,
    /// Flip one card's selection state.
    pub toggle_card_selection: AsyncAction<CardSelectionPayload>,
    /// Collapse every rule group.
    pub collapse_all_rules: AsyncAction<()>,
    /// Expand every rule group.
    pub expand_all_rules: AsyncAction<()>,
    /// Flip the global visual helper gate.
    pub toggle_visual_helper: AsyncAction<()>,
    /// Clear the focused result identifier.
    pub reset_focused_identifier: AsyncAction<()>,
    /// Reset the card view for fresh results.
    pub navigate_to_new_cards_view: AsyncAction<()>,
    /// Force a changed-emission with no mutation (initial snapshot requests).
    pub get_current_state: SyncAction<()>,
}

impl CardSelectionActions {
    /// Creates a collection with no listeners.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Assessment-scoped card selection actions.
#[derive(Default)]
pub struct AssessmentCardSelectionActions {
    /// Flip one rule group's expand/collapse state within a sub-test.
    pub toggle_rule_expand_collapse: AsyncAction<AssessmentRuleExpandCollapsePayload>,
    /// Flip one card's selection state within a sub-test.
    pub toggle_card_selection: AsyncAction<AssessmentCardSelectionPayload>,
    /// Collapse every rule group of a sub-test.
    pub collapse_all_rules: AsyncAction<AssessmentScopePayload>,
    /// Expand every rule group of a sub-test.
    pub expand_all_rules: AsyncAction<AssessmentScopePayload>,
    /// Flip a sub-test's visual helper gate.
    pub toggle_visual_helper: AsyncAction<AssessmentScopePayload>,
    /// Clear a sub-test's focused result identifier.
    pub reset_focused_identifier: AsyncAction<AssessmentScopePayload>,
    /// Reset a sub-test's card view for fresh results.
    pub navigate_to_new_cards_view: AsyncAction<AssessmentScopePayload>,
    /// Reset one sub-test to its default state.
    pub reset_data: AsyncAction<AssessmentScopePayload>,
    /// Reset every sub-test.
    pub reset_all_data: AsyncAction<()>,
    /// Force a changed-emission with no mutation.
    pub get_current_state: SyncAction<()>,
}

impl AssessmentCardSelectionActions {
    /// Creates a collection with no listeners.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Scan lifecycle actions for one scope (automated checks or needs review).
#[derive(Default)]
pub struct ScanResultActions {
    /// A scan finished; stores rebuild from the payload's results.
    pub scan_completed: AsyncAction<ScanCompletedPayload>,
}

impl ScanResultActions {
    /// Creates a collection with no listeners.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Target-page lifecycle actions.
#[derive(Default)]
pub struct TabActions {
    /// The inspected tab navigated or reloaded; per-target stores reset.
    pub existing_tab_updated: AsyncAction<()>,
}

impl TabActions {
    /// Creates a collection with no listeners.
    pub fn new() -> Self {
        Self::default()
    }
}
