//! Pure projection from card selection state to highlight instructions.
//!
//! The projection is the single place where selection, expansion, the visual
//! helper gate, result filtering, and platform availability combine into the
//! per-result highlight statuses the inspected page renders. It is
//! side-effect-free and deterministic: identical inputs yield identical
//! output, with no reliance on object identity or map iteration order.

use std::collections::{BTreeMap, BTreeSet};

use card_selection::CardSelectionStoreData;
use scan_abi::{ResultUid, RuleId, ScanResult};
use serde::{Deserialize, Serialize};

/// Per-result classification of how it is drawn on the inspected page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightStatus {
    /// Drawn normally.
    Visible,
    /// Not drawn.
    Hidden,
    /// In the highlight set, but the platform cannot draw it (off-screen,
    /// cross-origin frame, ...).
    Unavailable,
}

/// Output of the projection, consumed by the highlight renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSelectionViewData {
    /// Highlight status per filtered result uid.
    pub results_highlight_status: BTreeMap<ResultUid, HighlightStatus>,
    /// Rules whose groups are currently expanded.
    pub expanded_rule_ids: Vec<RuleId>,
    /// Selected uids within expanded rules, restricted to filtered results.
    /// Inert when `visual_helper_enabled` is false.
    pub selected_result_uids: Vec<ResultUid>,
    /// The global gate, passed through for the renderer.
    pub visual_helper_enabled: bool,
}

/// Computes the highlight view from a store snapshot plus scan results.
///
/// `is_highlight_unavailable` is the external platform predicate;
/// `results_filter` restricts the projection to a subset of results (`None`
/// accepts everything). Highlight precedence:
/// 1. no expanded rule: every filtered result;
/// 2. expanded rules but no selection in scope: filtered results of expanded
///    rules;
/// 3. otherwise exactly the selected, filtered uids.
pub fn card_selection_view_data<P>(
    store_data: Option<&CardSelectionStoreData>,
    results: Option<&[ScanResult]>,
    platform: &P,
    is_highlight_unavailable: impl Fn(&ScanResult, &P) -> bool,
    results_filter: Option<&dyn Fn(&ScanResult) -> bool>,
) -> CardSelectionViewData {
    let (Some(store_data), Some(results)) = (store_data, results) else {
        return CardSelectionViewData::default();
    };
    if store_data.has_no_rules() {
        return CardSelectionViewData::default();
    }
    let Some(rules) = store_data.rules.as_ref() else {
        return CardSelectionViewData::default();
    };

    let filtered: Vec<&ScanResult> = results
        .iter()
        .filter(|result| results_filter.map_or(true, |accept| accept(result)))
        .collect();
    let filtered_uids: BTreeSet<&str> = filtered.iter().map(|result| result.uid.as_str()).collect();

    let expanded_rule_ids: Vec<RuleId> = rules
        .iter()
        .filter(|(_, rule)| rule.is_expanded)
        .map(|(rule_id, _)| rule_id.clone())
        .collect();

    let selected_result_uids: Vec<ResultUid> = expanded_rule_ids
        .iter()
        .filter_map(|rule_id| rules.get(rule_id))
        .flat_map(|rule| rule.cards.iter())
        .filter(|(uid, selected)| **selected && filtered_uids.contains(uid.as_str()))
        .map(|(uid, _)| uid.clone())
        .collect();

    let highlight_set: BTreeSet<&str> = if expanded_rule_ids.is_empty() {
        filtered_uids.clone()
    } else if selected_result_uids.is_empty() {
        filtered
            .iter()
            .filter(|result| expanded_rule_ids.contains(&result.rule_id))
            .map(|result| result.uid.as_str())
            .collect()
    } else {
        selected_result_uids.iter().map(String::as_str).collect()
    };

    let results_highlight_status = filtered
        .iter()
        .map(|result| {
            let status = if !store_data.visual_helper_enabled {
                HighlightStatus::Hidden
            } else if !highlight_set.contains(result.uid.as_str()) {
                HighlightStatus::Hidden
            } else if is_highlight_unavailable(result, platform) {
                HighlightStatus::Unavailable
            } else {
                HighlightStatus::Visible
            };
            (result.uid.clone(), status)
        })
        .collect();

    CardSelectionViewData {
        results_highlight_status,
        expanded_rule_ids,
        selected_result_uids,
        visual_helper_enabled: store_data.visual_helper_enabled,
    }
}
