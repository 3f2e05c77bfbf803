//! The three store variants share one transition table; identical operation
//! sequences applied end-to-end (through messages, not ops directly) must
//! leave structurally equal inner state.

use std::sync::Arc;

use flux::InMemoryKeyValueStore;
use futures::executor::block_on;
use hub::ContextHub;
use messages::{
    AssessmentCardSelectionPayload, AssessmentMessage, AssessmentRuleExpandCollapsePayload,
    AssessmentScopePayload, CardSelectionMessage, CardSelectionPayload, Message,
    RuleExpandCollapsePayload, ScanCompletedPayload, ScanMessage,
};
use scan_abi::{group_uids_by_rule, AssessmentInfo, ResultStatus};

const TEST_KEY: &str = "headings";

fn build_hub() -> ContextHub {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    ContextHub::builder()
        .storage(storage as _)
        .target_id(1)
        .build()
        .expect("hub builds")
}

fn deliver(hub: &ContextHub, message: Message) {
    block_on(hub.interpret(message).resolve()).expect("handler resolves");
}

/// Each step as (single-target message, assessment message) carrying the same
/// operation, the assessment one scoped to [`TEST_KEY`].
fn paired_sequence() -> Vec<(CardSelectionMessage, AssessmentMessage)> {
    let scope = AssessmentScopePayload {
        test_key: TEST_KEY.to_string(),
    };
    vec![
        (
            CardSelectionMessage::ToggleRuleExpandCollapse(RuleExpandCollapsePayload {
                rule_id: "r1".to_string(),
            }),
            AssessmentMessage::ToggleRuleExpandCollapse(AssessmentRuleExpandCollapsePayload {
                test_key: TEST_KEY.to_string(),
                rule_id: "r1".to_string(),
            }),
        ),
        (
            CardSelectionMessage::ToggleCardSelection(CardSelectionPayload {
                rule_id: "r1".to_string(),
                result_instance_uid: "u2".to_string(),
            }),
            AssessmentMessage::ToggleCardSelection(AssessmentCardSelectionPayload {
                test_key: TEST_KEY.to_string(),
                rule_id: "r1".to_string(),
                result_instance_uid: "u2".to_string(),
            }),
        ),
        (
            CardSelectionMessage::ExpandAllRules,
            AssessmentMessage::ExpandAllRules(scope.clone()),
        ),
        (
            CardSelectionMessage::ToggleVisualHelper,
            AssessmentMessage::ToggleVisualHelper(scope.clone()),
        ),
        (
            CardSelectionMessage::ToggleVisualHelper,
            AssessmentMessage::ToggleVisualHelper(scope.clone()),
        ),
        (
            CardSelectionMessage::CollapseAllRules,
            AssessmentMessage::CollapseAllRules(scope.clone()),
        ),
        (
            CardSelectionMessage::ResetFocusedIdentifier,
            AssessmentMessage::ResetFocusedIdentifier(scope),
        ),
    ]
}

#[test]
fn identical_sequences_leave_equal_inner_state_across_variants() {
    let single = build_hub();
    let assessment = build_hub();

    let results = testdata::four_failures();
    deliver(
        &single,
        Message::Scan(ScanMessage::Completed(ScanCompletedPayload {
            results: results.clone(),
        })),
    );

    let info: AssessmentInfo = [(
        TEST_KEY.to_string(),
        group_uids_by_rule(&results, ResultStatus::Fail),
    )]
    .into_iter()
    .collect();
    block_on(assessment.assessment_store().load_assessment(&info));

    // Loading an assessment leaves its helpers off while a finished scan turns
    // the helper on; navigate-to-new-cards-view normalizes both to the same
    // starting point (collapsed, deselected, helper on since rules exist).
    deliver(
        &single,
        Message::CardSelection(CardSelectionMessage::NavigateToNewCardsView),
    );
    deliver(
        &assessment,
        Message::Assessment(AssessmentMessage::NavigateToNewCardsView(
            AssessmentScopePayload {
                test_key: TEST_KEY.to_string(),
            },
        )),
    );

    for (single_op, assessment_op) in paired_sequence() {
        deliver(&single, Message::CardSelection(single_op));
        deliver(&assessment, Message::Assessment(assessment_op));

        let single_state = single.card_selection_store().state().expect("state");
        let assessment_state = assessment.assessment_store().state().expect("state");
        assert_eq!(
            *single_state,
            assessment_state[TEST_KEY],
            "variants diverged mid-sequence"
        );
    }
}

#[test]
fn needs_review_matches_automated_checks_on_unknown_results() {
    let automated = build_hub();
    let needs_review = build_hub();

    // Same uids and rules, differing only in the status each scope selects.
    deliver(
        &automated,
        Message::Scan(ScanMessage::Completed(ScanCompletedPayload {
            results: testdata::four_failures(),
        })),
    );
    deliver(
        &needs_review,
        Message::Scan(ScanMessage::NeedsReviewCompleted(ScanCompletedPayload {
            results: testdata::four_unknowns(),
        })),
    );

    for (single_op, _) in paired_sequence() {
        deliver(&automated, Message::CardSelection(single_op.clone()));
        deliver(&needs_review, Message::NeedsReview(single_op));

        let automated_state = automated.card_selection_store().state().expect("state");
        let needs_review_state = needs_review.needs_review_store().state().expect("state");
        assert_eq!(*automated_state, *needs_review_state);
    }
}
