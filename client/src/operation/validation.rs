//! Dry-run result validation.
//!
//! The gate between "the node simulated it" and "broadcast it". Nothing
//! that fails here is ever injected.
//!
//! Three independent checks, all of which must pass:
//!
//! 1. **Envelope**: if the result carries a top-level `kind`, it must be
//!    a supported operation kind. Node error envelopes (`temporary`,
//!    `permanent`) fail here.
//! 2. **Contents**: every content entry's `kind` must be supported.
//! 3. **Outcome**: every content entry that reports an
//!    `operation_result` must have status `applied`.
//!
//! The first two look redundant on a good day. They aren't on a bad one:
//! the envelope is where the node reports group-level errors, the contents
//! are where it reports per-operation ones.

use thiserror::Error;

use super::result::{AppliedOperationResult, OperationStatus};
use crate::config::is_supported_kind;

/// Which part of a result failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultScope {
    Envelope,
    Content(usize),
}

impl std::fmt::Display for ResultScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultScope::Envelope => write!(f, "result envelope"),
            ResultScope::Content(i) => write!(f, "content entry {}", i),
        }
    }
}

/// A rejected dry-run result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A `kind` outside the supported set.
    #[error("unsupported operation kind {kind:?} in {scope} (node id: {})", .id.as_deref().unwrap_or("none"))]
    UnsupportedKind {
        scope: ResultScope,
        kind: String,
        id: Option<String>,
    },

    /// An operation the node simulated but did not apply.
    #[error("operation {index} was not applied: {status:?} (node id: {})", .id.as_deref().unwrap_or("none"))]
    NotApplied {
        index: usize,
        status: OperationStatus,
        id: Option<String>,
    },
}

impl ValidationError {
    /// The node's diagnostic id, if it sent one.
    pub fn diagnostic_id(&self) -> Option<&str> {
        match self {
            ValidationError::UnsupportedKind { id, .. } | ValidationError::NotApplied { id, .. } => {
                id.as_deref()
            }
        }
    }
}

/// Validate a dry-run result. See the module docs for the checks.
pub fn validate_applied_result(result: &AppliedOperationResult) -> Result<(), ValidationError> {
    if let Some(kind) = &result.kind {
        if !is_supported_kind(kind) {
            return Err(ValidationError::UnsupportedKind {
                scope: ResultScope::Envelope,
                kind: kind.clone(),
                id: result.id.clone(),
            });
        }
    }

    for (index, content) in result.contents.iter().enumerate() {
        if !is_supported_kind(&content.kind) {
            return Err(ValidationError::UnsupportedKind {
                scope: ResultScope::Content(index),
                kind: content.kind.clone(),
                id: result.id.clone(),
            });
        }
    }

    for (index, content) in result.contents.iter().enumerate() {
        if let Some(outcome) = content.outcome() {
            if outcome.status != OperationStatus::Applied {
                let id = outcome
                    .errors
                    .first()
                    .map(|e| e.id.clone())
                    .or_else(|| result.id.clone());
                return Err(ValidationError::NotApplied {
                    index,
                    status: outcome.status,
                    id,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::result::{AppliedContent, ContentMetadata, NodeDiagnostic, OperationOutcome};

    fn content(kind: &str) -> AppliedContent {
        AppliedContent {
            kind: kind.to_string(),
            metadata: None,
        }
    }

    fn with_status(kind: &str, status: OperationStatus, errors: Vec<NodeDiagnostic>) -> AppliedContent {
        AppliedContent {
            kind: kind.to_string(),
            metadata: Some(ContentMetadata {
                operation_result: Some(OperationOutcome { status, errors }),
            }),
        }
    }

    #[test]
    fn accepts_every_supported_kind() {
        for kind in crate::config::SUPPORTED_OPERATION_KINDS {
            let result = AppliedOperationResult {
                contents: vec![content(kind)],
                ..Default::default()
            };
            assert_eq!(validate_applied_result(&result), Ok(()), "{}", kind);
        }
    }

    #[test]
    fn accepts_applied_outcome() {
        let result = AppliedOperationResult {
            contents: vec![with_status("reveal", OperationStatus::Applied, vec![])],
            ..Default::default()
        };
        assert!(validate_applied_result(&result).is_ok());
    }

    #[test]
    fn rejects_error_envelope_with_its_id() {
        let result = AppliedOperationResult {
            kind: Some("temporary".into()),
            id: Some("proto.alpha.contract.counter_in_the_past".into()),
            ..Default::default()
        };
        let err = validate_applied_result(&result).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedKind {
                scope: ResultScope::Envelope,
                kind: "temporary".into(),
                id: Some("proto.alpha.contract.counter_in_the_past".into()),
            }
        );
        assert_eq!(err.diagnostic_id(), Some("proto.alpha.contract.counter_in_the_past"));
    }

    #[test]
    fn envelope_check_runs_even_when_contents_are_fine() {
        let result = AppliedOperationResult {
            kind: Some("permanent".into()),
            contents: vec![content("transaction")],
            ..Default::default()
        };
        assert!(matches!(
            validate_applied_result(&result),
            Err(ValidationError::UnsupportedKind { scope: ResultScope::Envelope, .. })
        ));
    }

    #[test]
    fn supported_envelope_kind_passes_through_to_contents() {
        let result = AppliedOperationResult {
            kind: Some("transaction".into()),
            id: Some("diag".into()),
            contents: vec![content("transaction"), content("endorsement")],
            ..Default::default()
        };
        let err = validate_applied_result(&result).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedKind {
                scope: ResultScope::Content(1),
                kind: "endorsement".into(),
                id: Some("diag".into()),
            }
        );
    }

    #[test]
    fn rejects_failed_outcome_with_first_error_id() {
        let result = AppliedOperationResult {
            id: Some("envelope-id".into()),
            contents: vec![with_status(
                "transaction",
                OperationStatus::Failed,
                vec![NodeDiagnostic {
                    kind: "temporary".into(),
                    id: "proto.alpha.contract.balance_too_low".into(),
                }],
            )],
            ..Default::default()
        };
        let err = validate_applied_result(&result).unwrap_err();
        assert_eq!(err.diagnostic_id(), Some("proto.alpha.contract.balance_too_low"));
        assert!(matches!(
            err,
            ValidationError::NotApplied { index: 0, status: OperationStatus::Failed, .. }
        ));
    }

    #[test]
    fn backtracked_without_errors_falls_back_to_envelope_id() {
        let result = AppliedOperationResult {
            id: Some("envelope-id".into()),
            contents: vec![with_status("delegation", OperationStatus::Backtracked, vec![])],
            ..Default::default()
        };
        assert_eq!(
            validate_applied_result(&result).unwrap_err().diagnostic_id(),
            Some("envelope-id")
        );
    }

    #[test]
    fn empty_result_is_accepted() {
        // Nothing unsupported in it. Whether an empty response is acceptable
        // at all is the pipeline's call, not the validator's.
        assert!(validate_applied_result(&AppliedOperationResult::default()).is_ok());
    }
}
