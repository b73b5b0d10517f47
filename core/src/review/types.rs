use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIDENCE: f32 = 0.5;
pub const DEFAULT_ISSUE_TYPE: &str = "unknown";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// One code change submitted for review. Shared read-only by every task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub file_path: String,
    #[serde(default)]
    pub old_code: String,
    pub new_code: String,
    #[serde(default)]
    pub language: String,
}

impl AnalysisRequest {
    pub fn new(
        file_path: impl Into<String>,
        old_code: impl Into<String>,
        new_code: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            old_code: old_code.into(),
            new_code: new_code.into(),
            language: language.into(),
        }
    }
}

/// A named review task to run against one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Display name, used in logs and outcomes.
    pub name: String,
    /// Selects the instruction strategy, e.g. `"security"` or `"quality"`.
    pub task_class: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, task_class: impl Into<String>, temperature: f32) -> Self {
        Self {
            name: name.into(),
            task_class: task_class.into(),
            temperature,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    #[default]
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Lenient label parsing; anything unrecognised maps to `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported issue. Many findings may point at the same line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub line_number: u32,
    pub issue_type: String,
    pub description: String,
    pub suggestion: String,
    pub confidence: f32,
}

impl Default for Finding {
    fn default() -> Self {
        Self {
            severity: Severity::Low,
            line_number: 0,
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
            description: String::new(),
            suggestion: String::new(),
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

/// Clamp a raw confidence into `[0, 1]`; non-finite values fall back to the default.
pub fn clamp_confidence(raw: f64) -> f32 {
    if raw.is_finite() {
        raw.clamp(0.0, 1.0) as f32
    } else {
        DEFAULT_CONFIDENCE
    }
}

/// Result of one task that ran to completion.
///
/// An empty `findings` list means "no issues reported", not "no result".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub task_name: String,
    pub findings: Vec<Finding>,
    /// Seconds spent in the backend call plus normalization.
    pub duration_secs: f64,
}

/// A task that was dropped from the outcome list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    pub task_name: String,
    pub error: String,
}

/// Everything a dispatch produced, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub outcomes: Vec<TaskOutcome>,
    pub failures: Vec<TaskFailure>,
}
