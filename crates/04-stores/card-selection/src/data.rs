//! Card selection store data shapes.

use std::collections::BTreeMap;

use scan_abi::{ResultUid, RuleId, TestKey};
use serde::{Deserialize, Serialize};

/// Expand/collapse and per-card selection state of one rule group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleExpandCollapseData {
    /// Whether the rule group is expanded in the card view.
    #[serde(default)]
    pub is_expanded: bool,
    /// Selection state per result instance. A key's presence means the result
    /// belongs to this rule; the value is selected/unselected. A uid appears
    /// under at most one rule.
    #[serde(default)]
    pub cards: BTreeMap<ResultUid, bool>,
}

/// Root aggregate: one instance per target page (or per assessment sub-test).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSelectionStoreData {
    /// Per-rule state; `None` until the first scan completes.
    #[serde(default)]
    pub rules: Option<BTreeMap<RuleId, RuleExpandCollapseData>>,
    /// Global gate: when false nothing is highlighted regardless of
    /// selection or expansion.
    #[serde(default)]
    pub visual_helper_enabled: bool,
    /// Last explicitly selected result; drives scroll/focus downstream.
    /// Sticky: unselecting does not clear it.
    #[serde(default)]
    pub focused_result_uid: Option<ResultUid>,
}

impl CardSelectionStoreData {
    /// True when no scan has populated any rules yet.
    pub fn has_no_rules(&self) -> bool {
        self.rules.as_ref().map_or(true, |rules| rules.is_empty())
    }
}

/// Assessment aggregate: one [`CardSelectionStoreData`] per sub-test.
pub type AssessmentCardSelectionStoreData = BTreeMap<TestKey, CardSelectionStoreData>;
