//! Assessment card selection store: one aggregate per sub-test.

use std::sync::Arc;

use flux::{seed_from_persisted, KeyValueStore, PersistentCore, StoreName};
use futures::future::BoxFuture;
use scan_abi::AssessmentInfo;
use serde_json::Value;

use crate::actions::AssessmentCardSelectionActions;
use crate::data::AssessmentCardSelectionStoreData;
use crate::ops;

fn apply_and_persist(
    core: &Arc<PersistentCore<AssessmentCardSelectionStoreData>>,
    op: impl FnOnce(&AssessmentCardSelectionStoreData) -> Option<AssessmentCardSelectionStoreData>,
) -> BoxFuture<'static, anyhow::Result<()>> {
    let applied = core.update(op);
    let core = Arc::clone(core);
    Box::pin(async move {
        if applied {
            core.persist_and_emit().await;
        }
        Ok(())
    })
}

/// Card selection state for an assessment, keyed by sub-test. Reuses the
/// single-target transition table per sub-test entry, so identical operation
/// sequences produce structurally equal per-test state.
pub struct AssessmentCardSelectionStore {
    core: Arc<PersistentCore<AssessmentCardSelectionStoreData>>,
    seed: AssessmentCardSelectionStoreData,
}

impl AssessmentCardSelectionStore {
    /// Creates the store, seeding from a previously persisted snapshot merged
    /// per sub-test over the (empty) default aggregate.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        target_id: u32,
        persisted: Option<Value>,
        persist: bool,
    ) -> Self {
        Self {
            core: Arc::new(PersistentCore::new(
                StoreName::AssessmentCardSelectionStore,
                storage,
                Some(target_id),
                persist,
            )),
            seed: seed_from_persisted(persisted),
        }
    }

    /// Seeds the state and subscribes every operation listener.
    pub fn initialize(&self, actions: &AssessmentCardSelectionActions) {
        self.core.initialize(self.seed.clone());

        {
            let core = Arc::clone(&self.core);
            actions.toggle_rule_expand_collapse.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                let rule_id = payload.rule_id.clone();
                apply_and_persist(&core, move |state| {
                    ops::update_test(state, &test_key, |test| {
                        ops::toggle_rule_expand_collapse(test, &rule_id)
                    })
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.toggle_card_selection.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                let rule_id = payload.rule_id.clone();
                let uid = payload.result_instance_uid.clone();
                apply_and_persist(&core, move |state| {
                    ops::update_test(state, &test_key, |test| {
                        ops::toggle_card_selection(test, &rule_id, &uid)
                    })
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.collapse_all_rules.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                apply_and_persist(&core, move |state| {
                    ops::update_test(state, &test_key, ops::collapse_all_rules)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.expand_all_rules.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                apply_and_persist(&core, move |state| {
                    ops::update_test(state, &test_key, ops::expand_all_rules)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.toggle_visual_helper.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                apply_and_persist(&core, move |state| {
                    ops::assessment_toggle_visual_helper(state, &test_key)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.reset_focused_identifier.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                apply_and_persist(&core, move |state| {
                    ops::update_test(state, &test_key, ops::reset_focused_identifier)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.navigate_to_new_cards_view.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                apply_and_persist(&core, move |state| {
                    ops::update_test(state, &test_key, ops::navigate_to_new_cards_view)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.reset_data.add_listener(move |payload| {
                let test_key = payload.test_key.clone();
                apply_and_persist(&core, move |state| {
                    ops::assessment_reset_data(state, &test_key)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.reset_all_data.add_listener(move |_| {
                apply_and_persist(&core, |_| Some(AssessmentCardSelectionStoreData::default()))
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions
                .get_current_state
                .add_listener(move |_| core.emit_changed());
        }
    }

    /// Replaces the aggregate with one rebuilt from assessment results,
    /// everything collapsed and unselected. Used when assessment data arrives
    /// outside the action channels (e.g. on assessment load).
    pub async fn load_assessment(&self, info: &AssessmentInfo) {
        if self
            .core
            .update(|_| Some(ops::from_assessment_info(info)))
        {
            self.core.persist_and_emit().await;
        }
    }

    /// Current snapshot, or `None` before initialization.
    pub fn state(&self) -> Option<Arc<AssessmentCardSelectionStoreData>> {
        self.core.state()
    }

    /// Subscribes a callback to "changed" emissions.
    pub fn on_changed(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.core.on_changed(callback);
    }

    /// The state a fresh assessment starts from: no sub-tests at all.
    pub fn default_state() -> AssessmentCardSelectionStoreData {
        AssessmentCardSelectionStoreData::default()
    }
}
