//! Cross-context message definitions.
//!
//! Every message that crosses an execution-context boundary is a variant of
//! the closed [`Message`] union, each carrying a strongly typed payload. The
//! interpreter routes on [`MessageKind`], the fieldless discriminant derived
//! by exhaustive match, so adding a message without a routing key fails to
//! compile.

mod payloads;

pub use payloads::{
    AssessmentCardSelectionPayload, AssessmentRuleExpandCollapsePayload, AssessmentScopePayload,
    CardSelectionPayload, RuleExpandCollapsePayload, ScanCompletedPayload,
};

use flux::StoreName;
use serde::{Deserialize, Serialize};

/// Closed union of every cross-context message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// Automated-checks card selection operations.
    CardSelection(CardSelectionMessage),
    /// Needs-review card selection operations (same shapes, separate channel).
    NeedsReview(CardSelectionMessage),
    /// Assessment card selection operations, scoped by sub-test.
    Assessment(AssessmentMessage),
    /// Scan lifecycle notifications.
    Scan(ScanMessage),
    /// Target-page lifecycle notifications.
    Tab(TabMessage),
    /// Ask the context owning `StoreName` to re-emit its current snapshot.
    GetStoreState(StoreName),
}

/// Card selection operations shared by the automated-checks and needs-review
/// scopes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardSelectionMessage {
    /// Flip one rule group's expand/collapse state.
    ToggleRuleExpandCollapse(RuleExpandCollapsePayload),
    /// Flip one card's selection state.
    ToggleCardSelection(CardSelectionPayload),
    /// Collapse every rule group.
    CollapseAllRules,
    /// Expand every rule group.
    ExpandAllRules,
    /// Flip the global visual helper gate.
    ToggleVisualHelper,
    /// Clear the focused result identifier.
    ResetFocusedIdentifier,
    /// Reset the card view for fresh results.
    NavigateToNewCardsView,
}

/// Assessment-scoped card selection operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AssessmentMessage {
    /// Flip one rule group's expand/collapse state within a sub-test.
    ToggleRuleExpandCollapse(AssessmentRuleExpandCollapsePayload),
    /// Flip one card's selection state within a sub-test.
    ToggleCardSelection(AssessmentCardSelectionPayload),
    /// Collapse every rule group of a sub-test.
    CollapseAllRules(AssessmentScopePayload),
    /// Expand every rule group of a sub-test.
    ExpandAllRules(AssessmentScopePayload),
    /// Flip a sub-test's visual helper gate.
    ToggleVisualHelper(AssessmentScopePayload),
    /// Clear a sub-test's focused result identifier.
    ResetFocusedIdentifier(AssessmentScopePayload),
    /// Reset a sub-test's card view for fresh results.
    NavigateToNewCardsView(AssessmentScopePayload),
    /// Reset one sub-test to its default state.
    ResetData(AssessmentScopePayload),
    /// Reset every sub-test.
    ResetAllData,
}

/// Scan lifecycle notifications consumed by the stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScanMessage {
    /// An automated-checks scan finished.
    Completed(ScanCompletedPayload),
    /// A needs-review scan finished.
    NeedsReviewCompleted(ScanCompletedPayload),
}

/// Target-page lifecycle notifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TabMessage {
    /// The inspected tab navigated or reloaded; per-target state resets.
    ExistingTabUpdated,
}

/// Routing key: one entry per concrete message shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    CardSelectionToggleRuleExpandCollapse,
    CardSelectionToggleCardSelection,
    CardSelectionCollapseAllRules,
    CardSelectionExpandAllRules,
    CardSelectionToggleVisualHelper,
    CardSelectionResetFocusedIdentifier,
    CardSelectionNavigateToNewCardsView,
    NeedsReviewToggleRuleExpandCollapse,
    NeedsReviewToggleCardSelection,
    NeedsReviewCollapseAllRules,
    NeedsReviewExpandAllRules,
    NeedsReviewToggleVisualHelper,
    NeedsReviewResetFocusedIdentifier,
    NeedsReviewNavigateToNewCardsView,
    AssessmentToggleRuleExpandCollapse,
    AssessmentToggleCardSelection,
    AssessmentCollapseAllRules,
    AssessmentExpandAllRules,
    AssessmentToggleVisualHelper,
    AssessmentResetFocusedIdentifier,
    AssessmentNavigateToNewCardsView,
    AssessmentResetData,
    AssessmentResetAllData,
    ScanCompleted,
    NeedsReviewScanCompleted,
    ExistingTabUpdated,
    GetStoreState,
}

impl Message {
    /// The routing key for this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::CardSelection(inner) => match inner {
                CardSelectionMessage::ToggleRuleExpandCollapse(_) => {
                    MessageKind::CardSelectionToggleRuleExpandCollapse
                }
                CardSelectionMessage::ToggleCardSelection(_) => {
                    MessageKind::CardSelectionToggleCardSelection
                }
                CardSelectionMessage::CollapseAllRules => MessageKind::CardSelectionCollapseAllRules,
                CardSelectionMessage::ExpandAllRules => MessageKind::CardSelectionExpandAllRules,
                CardSelectionMessage::ToggleVisualHelper => {
                    MessageKind::CardSelectionToggleVisualHelper
                }
                CardSelectionMessage::ResetFocusedIdentifier => {
                    MessageKind::CardSelectionResetFocusedIdentifier
                }
                CardSelectionMessage::NavigateToNewCardsView => {
                    MessageKind::CardSelectionNavigateToNewCardsView
                }
            },
            Message::NeedsReview(inner) => match inner {
                CardSelectionMessage::ToggleRuleExpandCollapse(_) => {
                    MessageKind::NeedsReviewToggleRuleExpandCollapse
                }
                CardSelectionMessage::ToggleCardSelection(_) => {
                    MessageKind::NeedsReviewToggleCardSelection
                }
                CardSelectionMessage::CollapseAllRules => MessageKind::NeedsReviewCollapseAllRules,
                CardSelectionMessage::ExpandAllRules => MessageKind::NeedsReviewExpandAllRules,
                CardSelectionMessage::ToggleVisualHelper => {
                    MessageKind::NeedsReviewToggleVisualHelper
                }
                CardSelectionMessage::ResetFocusedIdentifier => {
                    MessageKind::NeedsReviewResetFocusedIdentifier
                }
                CardSelectionMessage::NavigateToNewCardsView => {
                    MessageKind::NeedsReviewNavigateToNewCardsView
                }
            },
            Message::Assessment(inner) => match inner {
                AssessmentMessage::ToggleRuleExpandCollapse(_) => {
                    MessageKind::AssessmentToggleRuleExpandCollapse
                }
                AssessmentMessage::ToggleCardSelection(_) => {
                    MessageKind::AssessmentToggleCardSelection
                }
                AssessmentMessage::CollapseAllRules(_) => MessageKind::AssessmentCollapseAllRules,
                AssessmentMessage::ExpandAllRules(_) => MessageKind::AssessmentExpandAllRules,
                AssessmentMessage::ToggleVisualHelper(_) => {
                    MessageKind::AssessmentToggleVisualHelper
                }
                AssessmentMessage::ResetFocusedIdentifier(_) => {
                    MessageKind::AssessmentResetFocusedIdentifier
                }
                AssessmentMessage::NavigateToNewCardsView(_) => {
                    MessageKind::AssessmentNavigateToNewCardsView
                }
                AssessmentMessage::ResetData(_) => MessageKind::AssessmentResetData,
                AssessmentMessage::ResetAllData => MessageKind::AssessmentResetAllData,
            },
            Message::Scan(inner) => match inner {
                ScanMessage::Completed(_) => MessageKind::ScanCompleted,
                ScanMessage::NeedsReviewCompleted(_) => MessageKind::NeedsReviewScanCompleted,
            },
            Message::Tab(TabMessage::ExistingTabUpdated) => MessageKind::ExistingTabUpdated,
            Message::GetStoreState(_) => MessageKind::GetStoreState,
        }
    }
}
