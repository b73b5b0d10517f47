//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `diffscope_core::api` instead of reaching into internal modules.

pub use crate::backend::{GenerateRequest, GenerationBackend};
pub use crate::config::{
    load_default, load_from_path, AppConfig, BackendConfig, BackendKind, DispatchConfig,
    HttpServerConfig, LoggingConfig,
};
pub use crate::context::{AppContext, BackendFactory};
pub use crate::error::{BackendError, BackendErrorKind, CliError, ReviewError};
pub use crate::executor::{DispatchOptions, Dispatcher};
pub use crate::normalize::normalize;
pub use crate::review::{
    AggregateResult, AnalysisRequest, DispatchReport, Finding, Severity, SeverityCounts,
    TaskFailure, TaskOutcome, TaskSpec,
};
pub use crate::task::{known_keys, resolve, TaskClass};
