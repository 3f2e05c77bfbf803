//! Action creators: interpreter registrations forwarding typed message
//! payloads to the matching action channel.
//!
//! One registration function per store scope; a context calls only the ones
//! for the stores it hosts.

use std::sync::Arc;

use flux::AsyncAction;
use interpreter::Interpreter;
use messages::{
    AssessmentMessage, CardSelectionMessage, Message, MessageKind, ScanMessage, TabMessage,
};

use crate::actions::{
    AssessmentCardSelectionActions, CardSelectionActions, ScanResultActions, TabActions,
};

fn register_unit(
    interpreter: &Interpreter,
    kind: MessageKind,
    actions: &Arc<CardSelectionActions>,
    field: fn(&CardSelectionActions) -> &AsyncAction<()>,
) {
    let actions = Arc::clone(actions);
    interpreter.register(kind, move |_message| {
        let actions = Arc::clone(&actions);
        Box::pin(async move { field(&actions).invoke(&()).await })
    });
}

fn register_selection_scope(
    interpreter: &Interpreter,
    actions: &Arc<CardSelectionActions>,
    toggle_rule_kind: MessageKind,
    toggle_card_kind: MessageKind,
    unit_kinds: [MessageKind; 5],
    extract: fn(Message) -> Option<CardSelectionMessage>,
) {
    {
        let actions = Arc::clone(actions);
        interpreter.register(toggle_rule_kind, move |message| {
            let actions = Arc::clone(&actions);
            Box::pin(async move {
                if let Some(CardSelectionMessage::ToggleRuleExpandCollapse(payload)) =
                    extract(message)
                {
                    actions.toggle_rule_expand_collapse.invoke(&payload).await?;
                }
                Ok(())
            })
        });
    }
    {
        let actions = Arc::clone(actions);
        interpreter.register(toggle_card_kind, move |message| {
            let actions = Arc::clone(&actions);
            Box::pin(async move {
                if let Some(CardSelectionMessage::ToggleCardSelection(payload)) = extract(message) {
                    actions.toggle_card_selection.invoke(&payload).await?;
                }
                Ok(())
            })
        });
    }

    let unit_fields: [fn(&CardSelectionActions) -> &AsyncAction<()>; 5] = [
        |a| &a.collapse_all_rules,
        |a| &a.expand_all_rules,
        |a| &a.toggle_visual_helper,
        |a| &a.reset_focused_identifier,
        |a| &a.navigate_to_new_cards_view,
    ];
    for (kind, field) in unit_kinds.into_iter().zip(unit_fields) {
        register_unit(interpreter, kind, actions, field);
    }
}

/// Registers the automated-checks card selection messages.
pub fn register_card_selection_callbacks(
    interpreter: &Interpreter,
    actions: &Arc<CardSelectionActions>,
) {
    register_selection_scope(
        interpreter,
        actions,
        MessageKind::CardSelectionToggleRuleExpandCollapse,
        MessageKind::CardSelectionToggleCardSelection,
        [
            MessageKind::CardSelectionCollapseAllRules,
            MessageKind::CardSelectionExpandAllRules,
            MessageKind::CardSelectionToggleVisualHelper,
            MessageKind::CardSelectionResetFocusedIdentifier,
            MessageKind::CardSelectionNavigateToNewCardsView,
        ],
        |message| match message {
            Message::CardSelection(inner) => Some(inner),
            _ => None,
        },
    );
}

/// Registers the needs-review card selection messages.
pub fn register_needs_review_callbacks(
    interpreter: &Interpreter,
    actions: &Arc<CardSelectionActions>,
) {
    register_selection_scope(
        interpreter,
        actions,
        MessageKind::NeedsReviewToggleRuleExpandCollapse,
        MessageKind::NeedsReviewToggleCardSelection,
        [
            MessageKind::NeedsReviewCollapseAllRules,
            MessageKind::NeedsReviewExpandAllRules,
            MessageKind::NeedsReviewToggleVisualHelper,
            MessageKind::NeedsReviewResetFocusedIdentifier,
            MessageKind::NeedsReviewNavigateToNewCardsView,
        ],
        |message| match message {
            Message::NeedsReview(inner) => Some(inner),
            _ => None,
        },
    );
}

/// Registers the assessment card selection messages.
pub fn register_assessment_callbacks(
    interpreter: &Interpreter,
    actions: &Arc<AssessmentCardSelectionActions>,
) {
    let kinds = [
        MessageKind::AssessmentToggleRuleExpandCollapse,
        MessageKind::AssessmentToggleCardSelection,
        MessageKind::AssessmentCollapseAllRules,
        MessageKind::AssessmentExpandAllRules,
        MessageKind::AssessmentToggleVisualHelper,
        MessageKind::AssessmentResetFocusedIdentifier,
        MessageKind::AssessmentNavigateToNewCardsView,
        MessageKind::AssessmentResetData,
        MessageKind::AssessmentResetAllData,
    ];
    for kind in kinds {
        let actions = Arc::clone(actions);
        interpreter.register(kind, move |message| {
            let actions = Arc::clone(&actions);
            Box::pin(async move {
                let Message::Assessment(inner) = message else {
                    return Ok(());
                };
                match inner {
                    AssessmentMessage::ToggleRuleExpandCollapse(payload) => {
                        actions.toggle_rule_expand_collapse.invoke(&payload).await
                    }
                    AssessmentMessage::ToggleCardSelection(payload) => {
                        actions.toggle_card_selection.invoke(&payload).await
                    }
                    AssessmentMessage::CollapseAllRules(payload) => {
                        actions.collapse_all_rules.invoke(&payload).await
                    }
                    AssessmentMessage::ExpandAllRules(payload) => {
                        actions.expand_all_rules.invoke(&payload).await
                    }
                    AssessmentMessage::ToggleVisualHelper(payload) => {
                        actions.toggle_visual_helper.invoke(&payload).await
                    }
                    AssessmentMessage::ResetFocusedIdentifier(payload) => {
                        actions.reset_focused_identifier.invoke(&payload).await
                    }
                    AssessmentMessage::NavigateToNewCardsView(payload) => {
                        actions.navigate_to_new_cards_view.invoke(&payload).await
                    }
                    AssessmentMessage::ResetData(payload) => {
                        actions.reset_data.invoke(&payload).await
                    }
                    AssessmentMessage::ResetAllData => actions.reset_all_data.invoke(&()).await,
                }
            })
        });
    }
}

/// Registers the scan lifecycle messages for both single-target scopes.
pub fn register_scan_result_callbacks(
    interpreter: &Interpreter,
    automated: &Arc<ScanResultActions>,
    needs_review: &Arc<ScanResultActions>,
) {
    {
        let automated = Arc::clone(automated);
        interpreter.register(MessageKind::ScanCompleted, move |message| {
            let automated = Arc::clone(&automated);
            Box::pin(async move {
                if let Message::Scan(ScanMessage::Completed(payload)) = message {
                    automated.scan_completed.invoke(&payload).await?;
                }
                Ok(())
            })
        });
    }
    {
        let needs_review = Arc::clone(needs_review);
        interpreter.register(MessageKind::NeedsReviewScanCompleted, move |message| {
            let needs_review = Arc::clone(&needs_review);
            Box::pin(async move {
                if let Message::Scan(ScanMessage::NeedsReviewCompleted(payload)) = message {
                    needs_review.scan_completed.invoke(&payload).await?;
                }
                Ok(())
            })
        });
    }
}

/// Registers the target-page lifecycle messages.
pub fn register_tab_callbacks(interpreter: &Interpreter, actions: &Arc<TabActions>) {
    let actions = Arc::clone(actions);
    interpreter.register(MessageKind::ExistingTabUpdated, move |message| {
        let actions = Arc::clone(&actions);
        Box::pin(async move {
            if let Message::Tab(TabMessage::ExistingTabUpdated) = message {
                actions.existing_tab_updated.invoke(&()).await?;
            }
            Ok(())
        })
    });
}
