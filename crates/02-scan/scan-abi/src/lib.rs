//! Scan result types shared between the scan supplier, stores, and views.
//!
//! This crate defines the protocol boundary between the (external) scan
//! engine and the state layer, with no app-specific dependencies. The engine
//! itself is out of scope; everything here is opaque input to the stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of an accessibility rule. A rule owns zero or more result cards.
pub type RuleId = String;

/// Stable unique identifier of one result instance.
pub type ResultUid = String;

/// Identifier of an assessment sub-test.
pub type TestKey = String;

/// Outcome classification of a single scan result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    /// The checked element satisfied the rule.
    Pass,
    /// The checked element violated the rule.
    Fail,
    /// The engine could not decide; a human needs to review.
    Unknown,
}

/// One scan result instance as delivered by the scan engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Stable unique id for this result instance.
    pub uid: ResultUid,
    /// The rule this result belongs to.
    pub rule_id: RuleId,
    /// Outcome classification.
    pub status: ResultStatus,
}

impl ScanResult {
    /// Convenience constructor used by fixtures and tests.
    pub fn new(
        uid: impl Into<ResultUid>,
        rule_id: impl Into<RuleId>,
        status: ResultStatus,
    ) -> Self {
        Self {
            uid: uid.into(),
            rule_id: rule_id.into(),
            status,
        }
    }
}

/// Richer assessment result structure: sub-test to rule to instance uids.
///
/// The assessment card-selection store rebuilds its aggregate from this shape
/// rather than from a flat result list.
pub type AssessmentInfo = BTreeMap<TestKey, BTreeMap<RuleId, Vec<ResultUid>>>;

/// Groups the uids of `results` matching `status` by owning rule.
pub fn group_uids_by_rule(
    results: &[ScanResult],
    status: ResultStatus,
) -> BTreeMap<RuleId, Vec<ResultUid>> {
    let mut grouped: BTreeMap<RuleId, Vec<ResultUid>> = BTreeMap::new();
    for result in results {
        if result.status == status {
            grouped
                .entry(result.rule_id.clone())
                .or_default()
                .push(result.uid.clone());
        }
    }
    grouped
}
