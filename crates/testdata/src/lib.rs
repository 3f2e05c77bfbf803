//! Shared scan-result fixtures for store and integration tests.

use scan_abi::{AssessmentInfo, ResultStatus, ScanResult};

/// Four failing results across two rules: `r1` owns `u1`/`u2`, `r2` owns
/// `u3`/`u4`. The canonical shape used by the view-projection scenarios.
pub fn four_failures() -> Vec<ScanResult> {
    vec![
        ScanResult::new("u1", "r1", ResultStatus::Fail),
        ScanResult::new("u2", "r1", ResultStatus::Fail),
        ScanResult::new("u3", "r2", ResultStatus::Fail),
        ScanResult::new("u4", "r2", ResultStatus::Fail),
    ]
}

/// The same uids/rules as [`four_failures`] but with `Unknown` status, for
/// the needs-review scope.
pub fn four_unknowns() -> Vec<ScanResult> {
    four_failures()
        .into_iter()
        .map(|result| ScanResult {
            status: ResultStatus::Unknown,
            ..result
        })
        .collect()
}

/// A mix of all three statuses over two rules.
pub fn mixed_statuses() -> Vec<ScanResult> {
    vec![
        ScanResult::new("u1", "r1", ResultStatus::Fail),
        ScanResult::new("u2", "r1", ResultStatus::Unknown),
        ScanResult::new("u3", "r2", ResultStatus::Pass),
        ScanResult::new("u4", "r2", ResultStatus::Fail),
    ]
}

/// A two-sub-test assessment structure.
pub fn assessment_info() -> AssessmentInfo {
    let mut info = AssessmentInfo::new();
    info.insert(
        "headings".to_string(),
        [
            ("r1".to_string(), vec!["u1".to_string(), "u2".to_string()]),
            ("r2".to_string(), vec!["u3".to_string()]),
        ]
        .into(),
    );
    info.insert(
        "landmarks".to_string(),
        [("r3".to_string(), vec!["u4".to_string()])].into(),
    );
    info
}
