//! Payload structs carried by the message union and its action channels.

use scan_abi::{ResultUid, RuleId, ScanResult, TestKey};
use serde::{Deserialize, Serialize};

/// Targets one rule group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleExpandCollapsePayload {
    /// The rule whose group is toggled.
    pub rule_id: RuleId,
}

/// Targets one card within a rule group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSelectionPayload {
    /// The rule owning the card.
    pub rule_id: RuleId,
    /// The result instance whose selection is toggled.
    pub result_instance_uid: ResultUid,
}

/// Results delivered when a scan finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCompletedPayload {
    /// The full result set of the finished scan.
    pub results: Vec<ScanResult>,
}

/// Scopes an operation to one assessment sub-test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentScopePayload {
    /// The sub-test the operation applies to.
    pub test_key: TestKey,
}

/// Targets one rule group within an assessment sub-test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRuleExpandCollapsePayload {
    /// The sub-test the rule belongs to.
    pub test_key: TestKey,
    /// The rule whose group is toggled.
    pub rule_id: RuleId,
}

/// Targets one card within an assessment sub-test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentCardSelectionPayload {
    /// The sub-test the card belongs to.
    pub test_key: TestKey,
    /// The rule owning the card.
    pub rule_id: RuleId,
    /// The result instance whose selection is toggled.
    pub result_instance_uid: ResultUid,
}
