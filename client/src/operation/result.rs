//! Dry-run results as reported by the node.
//!
//! A preapply response is an array of these, one per submitted group.
//! Two shapes come back in practice:
//!
//! - **Success**: `{"contents": [{"kind": "transaction", …, "metadata":
//!   {"operation_result": {"status": "applied", …}}}], "signature": …}`
//! - **Error envelope**: `{"kind": "temporary", "id":
//!   "proto.alpha.contract.counter_in_the_past", …}` with no contents.
//!
//! Both deserialize into [`AppliedOperationResult`]; the validator decides
//! which one it's looking at.

use serde::{Deserialize, Serialize};

/// How an individual operation fared in the dry run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Applied,
    Failed,
    Skipped,
    Backtracked,
}

/// A node-reported error: classification plus a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDiagnostic {
    pub kind: String,
    pub id: String,
}

/// The `operation_result` block of a content entry's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<NodeDiagnostic>,
}

/// Metadata attached to a content entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_result: Option<OperationOutcome>,
}

/// One entry of a result's `contents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedContent {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ContentMetadata>,
}

impl AppliedContent {
    /// The dry-run outcome, if the node reported one.
    pub fn outcome(&self) -> Option<&OperationOutcome> {
        self.metadata.as_ref()?.operation_result.as_ref()
    }
}

/// The node's report on one dry-run operation group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOperationResult {
    /// Envelope kind. Absent on success; `temporary`/`permanent` on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Envelope diagnostic id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub contents: Vec<AppliedContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// What the caller gets back from a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub results: AppliedOperationResult,
    #[serde(rename = "operationGroupID")]
    pub operation_group_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_successful_preapply() {
        let result: AppliedOperationResult = serde_json::from_value(json!({
            "contents": [{
                "kind": "transaction",
                "source": "tz1src",
                "metadata": {
                    "balance_updates": [],
                    "operation_result": {"status": "applied", "consumed_gas": "100"}
                }
            }],
            "signature": "edsigX"
        }))
        .unwrap();

        assert!(result.kind.is_none());
        assert_eq!(result.contents.len(), 1);
        assert_eq!(
            result.contents[0].outcome().map(|o| o.status),
            Some(OperationStatus::Applied)
        );
    }

    #[test]
    fn parses_error_envelope() {
        let result: AppliedOperationResult = serde_json::from_value(json!({
            "kind": "temporary",
            "id": "proto.alpha.contract.counter_in_the_past",
            "contract": "tz1src",
            "expected": "42",
            "found": "41"
        }))
        .unwrap();

        assert_eq!(result.kind.as_deref(), Some("temporary"));
        assert_eq!(
            result.id.as_deref(),
            Some("proto.alpha.contract.counter_in_the_past")
        );
        assert!(result.contents.is_empty());
    }

    #[test]
    fn parses_failed_outcome_with_errors() {
        let content: AppliedContent = serde_json::from_value(json!({
            "kind": "transaction",
            "metadata": {"operation_result": {
                "status": "failed",
                "errors": [{"kind": "temporary", "id": "proto.alpha.contract.balance_too_low"}]
            }}
        }))
        .unwrap();

        let outcome = content.outcome().unwrap();
        assert_eq!(outcome.status, OperationStatus::Failed);
        assert_eq!(outcome.errors[0].id, "proto.alpha.contract.balance_too_low");
    }

    #[test]
    fn operation_result_wire_names() {
        let result = OperationResult {
            results: AppliedOperationResult::default(),
            operation_group_id: "ooHash".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["operationGroupID"], "ooHash");
        assert!(value.get("results").is_some());
    }
}
