//! # Operation Module
//!
//! Construction and validation of the operations the client submits.
//!
//! ```text
//! types.rs       Operation content (five kinds), groups, chain-state types
//! builder.rs     OperationBuilder for unsigned content
//! result.rs      Structured dry-run results from the node
//! validation.rs  The pre-injection gate over dry-run results
//! ```
//!
//! Signing lives in [`crate::crypto::signatures`]; submission lives in
//! [`crate::pipeline`].

pub mod builder;
pub mod result;
pub mod types;
pub mod validation;

pub use builder::{activation, BuilderError, OperationBuilder};
pub use result::{
    AppliedContent, AppliedOperationResult, NodeDiagnostic, OperationOutcome, OperationResult,
    OperationStatus,
};
pub use types::{
    Account, AppliedOperationPayload, BlockHead, ManagerKey, OperationContent, Parameters,
    SignedOperationGroup, UnsignedOperationGroup,
};
pub use validation::{validate_applied_result, ResultScope, ValidationError};
