//! Per-context assembly of stores, actions, and the message interpreter.
//!
//! A [`ContextHub`] is built once per execution context that hosts the
//! canonical store instances (normally the background context). It owns the
//! action collections, wires every store to them, registers the action
//! creators on the context's interpreter, and exposes the interpreter as the
//! transport's local delivery endpoint.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use card_selection::{
    register_assessment_callbacks, register_card_selection_callbacks,
    register_needs_review_callbacks, register_scan_result_callbacks, register_tab_callbacks,
    AssessmentCardSelectionActions, AssessmentCardSelectionStore, CardSelectionActions,
    CardSelectionStore, NeedsReviewCardSelectionStore, ScanResultActions, TabActions,
};
use flux::{storage_key, KeyValueStore, StoreName};
use interpreter::{Interpreter, InterpretResult};
use messages::{Message, MessageKind};
use serde_json::Value;

/// Previously persisted snapshots, fetched before the hub is built.
#[derive(Clone, Debug, Default)]
pub struct PersistedSnapshots {
    /// Automated-checks card selection snapshot.
    pub card_selection: Option<Value>,
    /// Needs-review card selection snapshot.
    pub needs_review: Option<Value>,
    /// Assessment card selection snapshot.
    pub assessment: Option<Value>,
}

/// Reads every store's persisted snapshot for one target from storage.
///
/// Read failures are treated as "nothing persisted": a store must always be
/// able to start from defaults.
pub async fn load_persisted_snapshots(
    storage: &dyn KeyValueStore,
    target_id: u32,
) -> PersistedSnapshots {
    let mut snapshots = PersistedSnapshots::default();
    let slots: [(&mut Option<Value>, StoreName); 3] = [
        (&mut snapshots.card_selection, StoreName::CardSelectionStore),
        (
            &mut snapshots.needs_review,
            StoreName::NeedsReviewCardSelectionStore,
        ),
        (
            &mut snapshots.assessment,
            StoreName::AssessmentCardSelectionStore,
        ),
    ];
    for (slot, name) in slots {
        *slot = storage
            .get(&storage_key(name, Some(target_id)))
            .await
            .unwrap_or_default();
    }
    snapshots
}

/// Aggregates the card selection stores of one execution context.
pub struct ContextHub {
    card_selection_actions: Arc<CardSelectionActions>,
    needs_review_actions: Arc<CardSelectionActions>,
    assessment_actions: Arc<AssessmentCardSelectionActions>,
    scan_actions: Arc<ScanResultActions>,
    needs_review_scan_actions: Arc<ScanResultActions>,
    tab_actions: Arc<TabActions>,
    card_selection_store: Arc<CardSelectionStore>,
    needs_review_store: Arc<NeedsReviewCardSelectionStore>,
    assessment_store: Arc<AssessmentCardSelectionStore>,
    interpreter: Interpreter,
}

impl ContextHub {
    /// Creates a new builder for constructing a hub.
    pub fn builder() -> ContextHubBuilder {
        ContextHubBuilder::new()
    }

    /// Delivers one inbound message to this context.
    pub fn interpret(&self, message: Message) -> InterpretResult {
        self.interpreter.interpret(message)
    }

    /// The context's message router.
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Automated-checks card selection store.
    pub fn card_selection_store(&self) -> &Arc<CardSelectionStore> {
        &self.card_selection_store
    }

    /// Needs-review card selection store.
    pub fn needs_review_store(&self) -> &Arc<NeedsReviewCardSelectionStore> {
        &self.needs_review_store
    }

    /// Assessment card selection store.
    pub fn assessment_store(&self) -> &Arc<AssessmentCardSelectionStore> {
        &self.assessment_store
    }

    /// Automated-checks action collection (for in-context invocations).
    pub fn card_selection_actions(&self) -> &Arc<CardSelectionActions> {
        &self.card_selection_actions
    }

    /// Needs-review action collection.
    pub fn needs_review_actions(&self) -> &Arc<CardSelectionActions> {
        &self.needs_review_actions
    }

    /// Assessment action collection.
    pub fn assessment_actions(&self) -> &Arc<AssessmentCardSelectionActions> {
        &self.assessment_actions
    }

    /// Scan lifecycle actions for the automated-checks scope.
    pub fn scan_actions(&self) -> &Arc<ScanResultActions> {
        &self.scan_actions
    }

    /// Scan lifecycle actions for the needs-review scope.
    pub fn needs_review_scan_actions(&self) -> &Arc<ScanResultActions> {
        &self.needs_review_scan_actions
    }

    /// Target-page lifecycle actions.
    pub fn tab_actions(&self) -> &Arc<TabActions> {
        &self.tab_actions
    }
}

/// Builder for assembling a [`ContextHub`].
pub struct ContextHubBuilder {
    storage: Option<Arc<dyn KeyValueStore>>,
    target_id: Option<u32>,
    persisted: PersistedSnapshots,
    persist: bool,
}

impl ContextHubBuilder {
    /// Creates a builder with persistence enabled and nothing persisted.
    pub fn new() -> Self {
        Self {
            storage: None,
            target_id: None,
            persisted: PersistedSnapshots::default(),
            persist: true,
        }
    }

    /// Sets the durable key-value store handle (required).
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the target (tab) identifier scoping the stores (required).
    pub fn target_id(mut self, target_id: u32) -> Self {
        self.target_id = Some(target_id);
        self
    }

    /// Seeds the stores from previously persisted snapshots.
    pub fn persisted(mut self, persisted: PersistedSnapshots) -> Self {
        self.persisted = persisted;
        self
    }

    /// Enables or disables durable writes for every store.
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Builds the hub: seeds and initializes every store, then registers all
    /// action creators and the store-state request handler.
    pub fn build(self) -> Result<ContextHub> {
        let storage = self.storage.ok_or_else(|| anyhow!("missing storage"))?;
        let target_id = self.target_id.ok_or_else(|| anyhow!("missing target id"))?;

        let card_selection_actions = Arc::new(CardSelectionActions::new());
        let needs_review_actions = Arc::new(CardSelectionActions::new());
        let assessment_actions = Arc::new(AssessmentCardSelectionActions::new());
        let scan_actions = Arc::new(ScanResultActions::new());
        let needs_review_scan_actions = Arc::new(ScanResultActions::new());
        let tab_actions = Arc::new(TabActions::new());

        let card_selection_store = Arc::new(CardSelectionStore::new(
            Arc::clone(&storage),
            target_id,
            self.persisted.card_selection,
            self.persist,
        ));
        card_selection_store.initialize(&card_selection_actions, &scan_actions, &tab_actions);

        let needs_review_store = Arc::new(NeedsReviewCardSelectionStore::new(
            Arc::clone(&storage),
            target_id,
            self.persisted.needs_review,
            self.persist,
        ));
        needs_review_store.initialize(
            &needs_review_actions,
            &needs_review_scan_actions,
            &tab_actions,
        );

        let assessment_store = Arc::new(AssessmentCardSelectionStore::new(
            Arc::clone(&storage),
            target_id,
            self.persisted.assessment,
            self.persist,
        ));
        assessment_store.initialize(&assessment_actions);

        let interpreter = Interpreter::new();
        register_card_selection_callbacks(&interpreter, &card_selection_actions);
        register_needs_review_callbacks(&interpreter, &needs_review_actions);
        register_assessment_callbacks(&interpreter, &assessment_actions);
        register_scan_result_callbacks(&interpreter, &scan_actions, &needs_review_scan_actions);
        register_tab_callbacks(&interpreter, &tab_actions);
        register_get_store_state(
            &interpreter,
            &card_selection_actions,
            &needs_review_actions,
            &assessment_actions,
        );

        Ok(ContextHub {
            card_selection_actions,
            needs_review_actions,
            assessment_actions,
            scan_actions,
            needs_review_scan_actions,
            tab_actions,
            card_selection_store,
            needs_review_store,
            assessment_store,
            interpreter,
        })
    }
}

impl Default for ContextHubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes `GetStoreState` snapshot requests to the named store's
/// get-current-state control action, which re-emits "changed" without
/// mutating.
fn register_get_store_state(
    interpreter: &Interpreter,
    card_selection: &Arc<CardSelectionActions>,
    needs_review: &Arc<CardSelectionActions>,
    assessment: &Arc<AssessmentCardSelectionActions>,
) {
    let card_selection = Arc::clone(card_selection);
    let needs_review = Arc::clone(needs_review);
    let assessment = Arc::clone(assessment);
    interpreter.register(MessageKind::GetStoreState, move |message| {
        let Message::GetStoreState(name) = message else {
            return Box::pin(async { Ok(()) });
        };
        match name {
            StoreName::CardSelectionStore => card_selection.get_current_state.invoke(&()),
            StoreName::NeedsReviewCardSelectionStore => needs_review.get_current_state.invoke(&()),
            StoreName::AssessmentCardSelectionStore => assessment.get_current_state.invoke(&()),
        }
        Box::pin(async { Ok(()) })
    });
}
