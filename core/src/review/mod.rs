//! Review data model: requests, task specs, findings and outcomes.

pub mod aggregate;
pub mod types;

pub use aggregate::{AggregateResult, SeverityCounts};
pub use types::{
    clamp_confidence, AnalysisRequest, DispatchReport, Finding, Severity, TaskFailure,
    TaskOutcome, TaskSpec, DEFAULT_CONFIDENCE, DEFAULT_ISSUE_TYPE, DEFAULT_TEMPERATURE,
};
