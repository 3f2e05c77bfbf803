//! The card selection transition table.
//!
//! Every operation is a pure copy-on-write function: it takes the current
//! snapshot and returns the replacement state, or `None` when the payload
//! references a rule/card/test that no longer exists (a stale message racing
//! a reset); the caller then neither publishes nor emits. All invariant
//! coupling (collapse deselects, disabling the helper deselects, selecting
//! enables the helper and moves focus) is enforced here and nowhere else.

use std::collections::BTreeMap;

use scan_abi::{group_uids_by_rule, AssessmentInfo, ResultStatus, ScanResult};

use crate::data::{
    AssessmentCardSelectionStoreData, CardSelectionStoreData, RuleExpandCollapseData,
};

fn deselect_rule(rule: &mut RuleExpandCollapseData) {
    for selected in rule.cards.values_mut() {
        *selected = false;
    }
}

fn deselect_all(state: &mut CardSelectionStoreData) {
    if let Some(rules) = state.rules.as_mut() {
        for rule in rules.values_mut() {
            deselect_rule(rule);
        }
    }
}

/// Flips a rule group's expansion; collapsing deselects every card under it.
pub fn toggle_rule_expand_collapse(
    state: &CardSelectionStoreData,
    rule_id: &str,
) -> Option<CardSelectionStoreData> {
    let mut next = state.clone();
    let rule = next.rules.as_mut()?.get_mut(rule_id)?;
    rule.is_expanded = !rule.is_expanded;
    if !rule.is_expanded {
        deselect_rule(rule);
    }
    Some(next)
}

/// Flips a card's selection; selecting enables the visual helper and focuses
/// the card. Unselecting leaves focus where it was.
pub fn toggle_card_selection(
    state: &CardSelectionStoreData,
    rule_id: &str,
    result_instance_uid: &str,
) -> Option<CardSelectionStoreData> {
    let mut next = state.clone();
    let rule = next.rules.as_mut()?.get_mut(rule_id)?;
    let selected = rule.cards.get_mut(result_instance_uid)?;
    *selected = !*selected;
    if *selected {
        next.visual_helper_enabled = true;
        next.focused_result_uid = Some(result_instance_uid.to_string());
    }
    Some(next)
}

/// Collapses every rule and deselects every card.
pub fn collapse_all_rules(state: &CardSelectionStoreData) -> Option<CardSelectionStoreData> {
    state.rules.as_ref()?;
    let mut next = state.clone();
    if let Some(rules) = next.rules.as_mut() {
        for rule in rules.values_mut() {
            rule.is_expanded = false;
            deselect_rule(rule);
        }
    }
    Some(next)
}

/// Expands every rule; selection is untouched.
pub fn expand_all_rules(state: &CardSelectionStoreData) -> Option<CardSelectionStoreData> {
    state.rules.as_ref()?;
    let mut next = state.clone();
    if let Some(rules) = next.rules.as_mut() {
        for rule in rules.values_mut() {
            rule.is_expanded = true;
        }
    }
    Some(next)
}

/// Flips the visual helper; turning it off deselects every card everywhere.
pub fn toggle_visual_helper(state: &CardSelectionStoreData) -> Option<CardSelectionStoreData> {
    let mut next = state.clone();
    next.visual_helper_enabled = !next.visual_helper_enabled;
    if !next.visual_helper_enabled {
        deselect_all(&mut next);
    }
    Some(next)
}

/// Clears the focused result identifier.
pub fn reset_focused_identifier(state: &CardSelectionStoreData) -> Option<CardSelectionStoreData> {
    let mut next = state.clone();
    next.focused_result_uid = None;
    Some(next)
}

/// Resets the card view for fresh results: clears focus, collapses and
/// deselects everything, then enables the helper exactly when rules exist.
pub fn navigate_to_new_cards_view(
    state: &CardSelectionStoreData,
) -> Option<CardSelectionStoreData> {
    let mut next = state.clone();
    next.focused_result_uid = None;
    if let Some(rules) = next.rules.as_mut() {
        for rule in rules.values_mut() {
            rule.is_expanded = false;
            deselect_rule(rule);
        }
    }
    next.visual_helper_enabled = !next.has_no_rules();
    Some(next)
}

/// Rebuilds the aggregate from a finished scan.
///
/// Prior state is discarded wholesale, expansion flags included, and every
/// card starts unselected with the visual helper on. Only results matching
/// `status` become cards (`Fail` for automated checks, `Unknown` for needs
/// review).
pub fn build_from_results(results: &[ScanResult], status: ResultStatus) -> CardSelectionStoreData {
    let rules: BTreeMap<_, _> = group_uids_by_rule(results, status)
        .into_iter()
        .map(|(rule_id, uids)| {
            let cards = uids.into_iter().map(|uid| (uid, false)).collect();
            (
                rule_id,
                RuleExpandCollapseData {
                    is_expanded: false,
                    cards,
                },
            )
        })
        .collect();

    CardSelectionStoreData {
        rules: Some(rules),
        visual_helper_enabled: true,
        focused_result_uid: None,
    }
}

/// Builds the assessment aggregate from the per-sub-test result structure,
/// everything collapsed and unselected.
pub fn from_assessment_info(info: &AssessmentInfo) -> AssessmentCardSelectionStoreData {
    info.iter()
        .map(|(test_key, rule_instances)| {
            let rules = rule_instances
                .iter()
                .map(|(rule_id, uids)| {
                    let cards = uids.iter().map(|uid| (uid.clone(), false)).collect();
                    (
                        rule_id.clone(),
                        RuleExpandCollapseData {
                            is_expanded: false,
                            cards,
                        },
                    )
                })
                .collect();
            (
                test_key.clone(),
                CardSelectionStoreData {
                    rules: Some(rules),
                    visual_helper_enabled: false,
                    focused_result_uid: None,
                },
            )
        })
        .collect()
}

/// Applies a single-target operation to one sub-test of the assessment
/// aggregate. `None` when the sub-test does not exist or the inner operation
/// was itself a stale no-op.
pub fn update_test(
    state: &AssessmentCardSelectionStoreData,
    test_key: &str,
    op: impl FnOnce(&CardSelectionStoreData) -> Option<CardSelectionStoreData>,
) -> Option<AssessmentCardSelectionStoreData> {
    let test = state.get(test_key)?;
    let next_test = op(test)?;
    let mut next = state.clone();
    next.insert(test_key.to_string(), next_test);
    Some(next)
}

/// Flips one sub-test's visual helper; turning it off deselects every card in
/// every sub-test.
pub fn assessment_toggle_visual_helper(
    state: &AssessmentCardSelectionStoreData,
    test_key: &str,
) -> Option<AssessmentCardSelectionStoreData> {
    let mut next = state.clone();
    let test = next.get_mut(test_key)?;
    test.visual_helper_enabled = !test.visual_helper_enabled;
    let now_enabled = test.visual_helper_enabled;
    if !now_enabled {
        for test in next.values_mut() {
            deselect_all(test);
        }
    }
    Some(next)
}

/// Resets one sub-test to its default state.
pub fn assessment_reset_data(
    state: &AssessmentCardSelectionStoreData,
    test_key: &str,
) -> Option<AssessmentCardSelectionStoreData> {
    state.get(test_key)?;
    let mut next = state.clone();
    next.insert(test_key.to_string(), CardSelectionStoreData::default());
    Some(next)
}
