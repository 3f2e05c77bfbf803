//! End-to-end flow across two isolated execution contexts.
//!
//! The background context owns the canonical stores and the interpreter; the
//! panel context sends serialized messages over a channel (the stand-in
//! transport) and re-runs the view projection on every snapshot it receives
//! back. Consistency is eventual: the panel never reads background memory,
//! only snapshots pushed after "changed".

use std::sync::Arc;
use std::thread;

use card_selection::CardSelectionStoreData;
use card_view::{card_selection_view_data, HighlightStatus};
use crossbeam_channel::{unbounded, Receiver, Sender};
use flux::InMemoryKeyValueStore;
use futures::executor::block_on;
use hub::ContextHub;
use messages::{
    CardSelectionMessage, CardSelectionPayload, Message, RuleExpandCollapsePayload,
    ScanCompletedPayload, ScanMessage,
};
use scan_abi::ScanResult;

struct NoConstraints;

/// Spawns the background context: deserializes each inbound message,
/// interprets it, and resolves the handler on this context's event loop.
/// Snapshot pushes ride the store's own "changed" subscription.
fn spawn_background(
    inbound: Receiver<String>,
    snapshots: Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let hub = ContextHub::builder()
            .storage(storage as _)
            .target_id(1)
            .build()
            .expect("hub builds");

        {
            let store = Arc::clone(hub.card_selection_store());
            hub.card_selection_store().on_changed(move || {
                if let Some(state) = store.state() {
                    if let Ok(encoded) = serde_json::to_string(&*state) {
                        let _ = snapshots.send(encoded);
                    }
                }
            });
        }

        for encoded in inbound {
            let message: Message = serde_json::from_str(&encoded).expect("decodable message");
            block_on(hub.interpret(message).resolve()).expect("handler resolves");
        }
    })
}

fn send(outbound: &Sender<String>, message: Message) {
    outbound
        .send(serde_json::to_string(&message).expect("encodable message"))
        .expect("background alive");
}

fn recv_snapshot(snapshots: &Receiver<String>) -> CardSelectionStoreData {
    let encoded = snapshots.recv().expect("snapshot pushed");
    serde_json::from_str(&encoded).expect("decodable snapshot")
}

fn project(store: &CardSelectionStoreData, results: &[ScanResult]) -> Vec<(String, HighlightStatus)> {
    let view = card_selection_view_data(
        Some(store),
        Some(results),
        &NoConstraints,
        |_: &ScanResult, _: &NoConstraints| false,
        None,
    );
    view.results_highlight_status.into_iter().collect()
}

#[test]
fn panel_converges_on_background_state_through_messages() {
    let (outbound, inbound) = unbounded();
    let (snapshot_tx, snapshots) = unbounded();
    let background = spawn_background(inbound, snapshot_tx);
    let results = testdata::four_failures();

    // Scan completes: all rules collapsed, everything highlighted.
    send(
        &outbound,
        Message::Scan(ScanMessage::Completed(ScanCompletedPayload {
            results: results.clone(),
        })),
    );
    let state = recv_snapshot(&snapshots);
    assert!(state.visual_helper_enabled);
    assert!(project(&state, &results)
        .iter()
        .all(|(_, status)| *status == HighlightStatus::Visible));

    // Panel expands r1: highlighting narrows to r1's results.
    send(
        &outbound,
        Message::CardSelection(CardSelectionMessage::ToggleRuleExpandCollapse(
            RuleExpandCollapsePayload {
                rule_id: "r1".to_string(),
            },
        )),
    );
    let state = recv_snapshot(&snapshots);
    let statuses = project(&state, &results);
    assert_eq!(
        statuses
            .iter()
            .filter(|(_, status)| *status == HighlightStatus::Visible)
            .map(|(uid, _)| uid.as_str())
            .collect::<Vec<_>>(),
        vec!["u1", "u2"]
    );

    // Panel selects u1: highlighting narrows to the selection.
    send(
        &outbound,
        Message::CardSelection(CardSelectionMessage::ToggleCardSelection(
            CardSelectionPayload {
                rule_id: "r1".to_string(),
                result_instance_uid: "u1".to_string(),
            },
        )),
    );
    let state = recv_snapshot(&snapshots);
    assert_eq!(state.focused_result_uid.as_deref(), Some("u1"));
    let statuses = project(&state, &results);
    assert_eq!(
        statuses
            .iter()
            .filter(|(_, status)| *status == HighlightStatus::Visible)
            .map(|(uid, _)| uid.as_str())
            .collect::<Vec<_>>(),
        vec!["u1"]
    );

    // Panel turns the visual helper off: everything hides.
    send(
        &outbound,
        Message::CardSelection(CardSelectionMessage::ToggleVisualHelper),
    );
    let state = recv_snapshot(&snapshots);
    assert!(!state.visual_helper_enabled);
    assert!(project(&state, &results)
        .iter()
        .all(|(_, status)| *status == HighlightStatus::Hidden));

    // Stale message referencing a rule that no longer exists: no push at all.
    send(
        &outbound,
        Message::CardSelection(CardSelectionMessage::ToggleRuleExpandCollapse(
            RuleExpandCollapsePayload {
                rule_id: "gone".to_string(),
            },
        )),
    );
    drop(outbound);
    background.join().expect("background exits cleanly");
    assert!(
        snapshots.try_recv().is_err(),
        "stale no-op must not emit a snapshot"
    );
}

#[test]
fn messages_keep_per_sender_ordering() {
    let (outbound, inbound) = unbounded();
    let (snapshot_tx, snapshots) = unbounded();
    let background = spawn_background(inbound, snapshot_tx);

    send(
        &outbound,
        Message::Scan(ScanMessage::Completed(ScanCompletedPayload {
            results: testdata::four_failures(),
        })),
    );
    // Expand-then-collapse of the same rule sent back-to-back by one sender
    // must apply in order: the final snapshot shows the rule collapsed.
    for _ in 0..2 {
        send(
            &outbound,
            Message::CardSelection(CardSelectionMessage::ToggleRuleExpandCollapse(
                RuleExpandCollapsePayload {
                    rule_id: "r1".to_string(),
                },
            )),
        );
    }
    drop(outbound);
    background.join().expect("background exits cleanly");

    let mut last = None;
    while let Ok(encoded) = snapshots.try_recv() {
        last = Some(encoded);
    }
    let state: CardSelectionStoreData =
        serde_json::from_str(&last.expect("snapshots pushed")).expect("decodable");
    assert!(!state.rules.as_ref().expect("rules")["r1"].is_expanded);
}
