//! The two single-target card selection stores.

use std::sync::Arc;

use flux::{seed_from_persisted, KeyValueStore, PersistentCore, StoreName};
use futures::future::BoxFuture;
use scan_abi::ResultStatus;
use serde_json::Value;

use crate::actions::{CardSelectionActions, ScanResultActions, TabActions};
use crate::data::CardSelectionStoreData;
use crate::ops;

/// Publishes a copy-on-write mutation, then persists and emits only when the
/// operation actually applied (stale payloads mutate nothing and stay
/// silent). The mutation itself runs synchronously inside the listener call,
/// so it is atomic with respect to the other listeners of the same dispatch.
pub(crate) fn apply_and_persist(
    core: &Arc<PersistentCore<CardSelectionStoreData>>,
    op: impl FnOnce(&CardSelectionStoreData) -> Option<CardSelectionStoreData>,
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

/// Shared wiring of the single-target transition table over a persistent
/// core. The automated-checks and needs-review stores differ only in store
/// name and in which result status becomes cards.
pub(crate) struct SingleTargetStore {
    core: Arc<PersistentCore<CardSelectionStoreData>>,
    seed: CardSelectionStoreData,
    scan_status: ResultStatus,
}

impl SingleTargetStore {
    fn new(
        name: StoreName,
        scan_status: ResultStatus,
        storage: Arc<dyn KeyValueStore>,
        target_id: u32,
        persisted: Option<Value>,
        persist: bool,
    ) -> Self {
        Self {
            core: Arc::new(PersistentCore::new(name, storage, Some(target_id), persist)),
            seed: seed_from_persisted(persisted),
            scan_status,
        }
    }

    /// Seeds the state and subscribes every operation listener.
    fn initialize(
        &self,
        actions: &CardSelectionActions,
        scan_actions: &ScanResultActions,
        tab_actions: &TabActions,
    ) {
        self.core.initialize(self.seed.clone());

        {
            let core = Arc::clone(&self.core);
            actions.toggle_rule_expand_collapse.add_listener(move |payload| {
                let rule_id = payload.rule_id.clone();
                apply_and_persist(&core, move |state| {
                    ops::toggle_rule_expand_collapse(state, &rule_id)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions.toggle_card_selection.add_listener(move |payload| {
                let rule_id = payload.rule_id.clone();
                let uid = payload.result_instance_uid.clone();
                apply_and_persist(&core, move |state| {
                    ops::toggle_card_selection(state, &rule_id, &uid)
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            actions
                .collapse_all_rules
                .add_listener(move |_| apply_and_persist(&core, ops::collapse_all_rules));
        }
        {
            let core = Arc::clone(&self.core);
            actions
                .expand_all_rules
                .add_listener(move |_| apply_and_persist(&core, ops::expand_all_rules));
        }
        {
            let core = Arc::clone(&self.core);
            actions
                .toggle_visual_helper
                .add_listener(move |_| apply_and_persist(&core, ops::toggle_visual_helper));
        }
        {
            let core = Arc::clone(&self.core);
            actions
                .reset_focused_identifier
                .add_listener(move |_| apply_and_persist(&core, ops::reset_focused_identifier));
        }
        {
            let core = Arc::clone(&self.core);
            actions
                .navigate_to_new_cards_view
                .add_listener(move |_| apply_and_persist(&core, ops::navigate_to_new_cards_view));
        }
        {
            let core = Arc::clone(&self.core);
            actions
                .get_current_state
                .add_listener(move |_| core.emit_changed());
        }
        {
            let core = Arc::clone(&self.core);
            let status = self.scan_status;
            scan_actions.scan_completed.add_listener(move |payload| {
                let results = payload.results.clone();
                apply_and_persist(&core, move |_| {
                    Some(ops::build_from_results(&results, status))
                })
            });
        }
        {
            let core = Arc::clone(&self.core);
            tab_actions.existing_tab_updated.add_listener(move |_| {
                apply_and_persist(&core, |_| Some(CardSelectionStoreData::default()))
            });
        }
    }

    fn state(&self) -> Option<Arc<CardSelectionStoreData>> {
        self.core.state()
    }

    fn on_changed(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.core.on_changed(callback);
    }
}

/// Automated-checks card selection store: one per target page, rebuilt from
/// `Fail` results on each scan.
pub struct CardSelectionStore {
    inner: SingleTargetStore,
}

impl CardSelectionStore {
    /// Creates the store, seeding from a previously persisted snapshot merged
    /// field-by-field over defaults.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        target_id: u32,
        persisted: Option<Value>,
        persist: bool,
    ) -> Self {
        Self {
            inner: SingleTargetStore::new(
                StoreName::CardSelectionStore,
                ResultStatus::Fail,
                storage,
                target_id,
                persisted,
                persist,
            ),
        }
    }

    /// Seeds the state and subscribes to the scope's action channels.
    pub fn initialize(
        &self,
        actions: &CardSelectionActions,
        scan_actions: &ScanResultActions,
        tab_actions: &TabActions,
    ) {
        self.inner.initialize(actions, scan_actions, tab_actions);
    }

    /// Current snapshot, or `None` before initialization.
    pub fn state(&self) -> Option<Arc<CardSelectionStoreData>> {
        self.inner.state()
    }

    /// Subscribes a callback to "changed" emissions.
    pub fn on_changed(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.inner.on_changed(callback);
    }

    /// The state a fresh target starts from.
    pub fn default_state() -> CardSelectionStoreData {
        CardSelectionStoreData::default()
    }
}

/// Needs-review card selection store: same transition table as
/// [`CardSelectionStore`], rebuilt from `Unknown` results instead.
pub struct NeedsReviewCardSelectionStore {
    inner: SingleTargetStore,
}

impl NeedsReviewCardSelectionStore {
    /// Creates the store, seeding from a previously persisted snapshot merged
    /// field-by-field over defaults.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        target_id: u32,
        persisted: Option<Value>,
        persist: bool,
    ) -> Self {
        Self {
            inner: SingleTargetStore::new(
                StoreName::NeedsReviewCardSelectionStore,
                ResultStatus::Unknown,
                storage,
                target_id,
                persisted,
                persist,
            ),
        }
    }

    /// Seeds the state and subscribes to the scope's action channels.
    pub fn initialize(
        &self,
        actions: &CardSelectionActions,
        scan_actions: &ScanResultActions,
        tab_actions: &TabActions,
    ) {
        self.inner.initialize(actions, scan_actions, tab_actions);
    }

    /// Current snapshot, or `None` before initialization.
    pub fn state(&self) -> Option<Arc<CardSelectionStoreData>> {
        self.inner.state()
    }

    /// Subscribes a callback to "changed" emissions.
    pub fn on_changed(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.inner.on_changed(callback);
    }

    /// The state a fresh target starts from.
    pub fn default_state() -> CardSelectionStoreData {
        CardSelectionStoreData::default()
    }
}
