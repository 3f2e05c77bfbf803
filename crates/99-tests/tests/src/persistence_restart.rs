//! Session restart over shared storage: every mutation persists before its
//! "changed" emission, so a hub rebuilt from the same storage resumes exactly
//! where the previous one stopped.

use std::sync::Arc;

use flux::InMemoryKeyValueStore;
use futures::executor::block_on;
use hub::{load_persisted_snapshots, ContextHub};
use messages::{
    AssessmentMessage, AssessmentRuleExpandCollapsePayload, CardSelectionMessage,
    CardSelectionPayload, Message, RuleExpandCollapsePayload, ScanCompletedPayload, ScanMessage,
    TabMessage,
};
use serde_json::json;

fn build_hub(storage: &Arc<InMemoryKeyValueStore>, target_id: u32) -> ContextHub {
    let persisted = block_on(load_persisted_snapshots(storage.as_ref(), target_id));
    ContextHub::builder()
        .storage(Arc::clone(storage) as _)
        .target_id(target_id)
        .persisted(persisted)
        .build()
        .expect("hub builds")
}

fn deliver(hub: &ContextHub, message: Message) {
    block_on(hub.interpret(message).resolve()).expect("handler resolves");
}

#[test]
fn restarted_hub_resumes_with_the_previous_sessions_state() {
    let storage = Arc::new(InMemoryKeyValueStore::new());

    let first = build_hub(&storage, 1);
    deliver(
        &first,
        Message::Scan(ScanMessage::Completed(ScanCompletedPayload {
            results: testdata::four_failures(),
        })),
    );
    deliver(
        &first,
        Message::CardSelection(CardSelectionMessage::ToggleRuleExpandCollapse(
            RuleExpandCollapsePayload {
                rule_id: "r1".to_string(),
            },
        )),
    );
    deliver(
        &first,
        Message::CardSelection(CardSelectionMessage::ToggleCardSelection(
            CardSelectionPayload {
                rule_id: "r1".to_string(),
                result_instance_uid: "u1".to_string(),
            },
        )),
    );
    let final_state = first.card_selection_store().state().expect("state");
    drop(first);

    let second = build_hub(&storage, 1);
    let restored = second.card_selection_store().state().expect("state");
    assert_eq!(*restored, *final_state);
    assert_eq!(restored.focused_result_uid.as_deref(), Some("u1"));
    assert!(restored.rules.as_ref().expect("rules")["r1"].cards["u1"]);
}

#[test]
fn each_store_persists_under_its_own_target_scoped_key() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let hub = build_hub(&storage, 7);

    deliver(
        &hub,
        Message::Scan(ScanMessage::Completed(ScanCompletedPayload {
            results: testdata::four_failures(),
        })),
    );
    deliver(
        &hub,
        Message::Scan(ScanMessage::NeedsReviewCompleted(ScanCompletedPayload {
            results: testdata::four_unknowns(),
        })),
    );
    block_on(
        hub.assessment_store()
            .load_assessment(&testdata::assessment_info()),
    );

    assert!(storage.snapshot("cardSelection:7").is_some());
    assert!(storage.snapshot("needsReviewCardSelection:7").is_some());
    assert!(storage.snapshot("assessmentCardSelection:7").is_some());
    assert!(
        storage.snapshot("cardSelection:1").is_none(),
        "keys are scoped by target id"
    );
}

#[test]
fn partially_persisted_snapshot_merges_over_defaults_on_restart() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    // A snapshot written by an older build that predates focus tracking.
    storage.seed(
        "cardSelection:1",
        json!({
            "rules": {"r1": {"isExpanded": true, "cards": {"u1": true}}},
            "visualHelperEnabled": true
        }),
    );

    let hub = build_hub(&storage, 1);
    let state = hub.card_selection_store().state().expect("state");
    assert!(state.visual_helper_enabled);
    assert!(state.rules.as_ref().expect("rules")["r1"].is_expanded);
    assert_eq!(state.focused_result_uid, None, "absent field takes default");
}

#[test]
fn assessment_restart_preserves_per_sub_test_state() {
    let storage = Arc::new(InMemoryKeyValueStore::new());

    let first = build_hub(&storage, 1);
    block_on(
        first
            .assessment_store()
            .load_assessment(&testdata::assessment_info()),
    );
    deliver(
        &first,
        Message::Assessment(AssessmentMessage::ToggleRuleExpandCollapse(
            AssessmentRuleExpandCollapsePayload {
                test_key: "headings".to_string(),
                rule_id: "r1".to_string(),
            },
        )),
    );
    let final_state = first.assessment_store().state().expect("state");
    drop(first);

    let second = build_hub(&storage, 1);
    let restored = second.assessment_store().state().expect("state");
    assert_eq!(*restored, *final_state);
    assert!(restored["headings"].rules.as_ref().expect("rules")["r1"].is_expanded);
    assert!(!restored["landmarks"].rules.as_ref().expect("rules")["r3"].is_expanded);
}

#[test]
fn tab_update_resets_state_and_the_persisted_snapshot() {
    let storage = Arc::new(InMemoryKeyValueStore::new());

    let first = build_hub(&storage, 1);
    deliver(
        &first,
        Message::Scan(ScanMessage::Completed(ScanCompletedPayload {
            results: testdata::four_failures(),
        })),
    );
    deliver(&first, Message::Tab(TabMessage::ExistingTabUpdated));
    assert!(first
        .card_selection_store()
        .state()
        .expect("state")
        .rules
        .is_none());
    drop(first);

    // The reset was itself persisted: a restart does not resurrect old rules.
    let second = build_hub(&storage, 1);
    assert!(second
        .card_selection_store()
        .state()
        .expect("state")
        .rules
        .is_none());
}
