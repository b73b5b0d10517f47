use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReviewError;
use crate::review::TaskSpec;

use super::instructions::{InstructionStrategy, QualityInstructions, SecurityInstructions};
use super::runner::TaskRunner;

/// The closed set of review task implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskClass {
    Security,
    Quality,
}

impl TaskClass {
    pub const ALL: [TaskClass; 2] = [TaskClass::Security, TaskClass::Quality];

    pub fn key(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Quality => "quality",
        }
    }

    pub fn instructions(self) -> &'static dyn InstructionStrategy {
        match self {
            Self::Security => &SecurityInstructions,
            Self::Quality => &QualityInstructions,
        }
    }
}

impl fmt::Display for TaskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TaskClass {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| ReviewError::UnknownTaskClass(s.to_string()))
    }
}

/// Look up the task class for a caller-supplied key.
pub fn resolve(class_key: &str) -> Result<TaskClass, ReviewError> {
    class_key.parse()
}

/// Construct the runner for `spec`, failing on an unknown class key.
pub fn build_runner(spec: &TaskSpec) -> Result<TaskRunner, ReviewError> {
    let class = resolve(&spec.task_class)?;
    Ok(TaskRunner::new(spec, class))
}

pub fn known_keys() -> Vec<&'static str> {
    TaskClass::ALL.iter().map(|c| c.key()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_keys() {
        assert_eq!(resolve("security").unwrap(), TaskClass::Security);
        assert_eq!(resolve("quality").unwrap(), TaskClass::Quality);
        assert_eq!(resolve(" Quality ").unwrap(), TaskClass::Quality);
    }

    #[test]
    fn test_resolve_unknown_key() {
        match resolve("performance") {
            Err(ReviewError::UnknownTaskClass(key)) => assert_eq!(key, "performance"),
            other => panic!("expected UnknownTaskClass, got {other:?}"),
        }
    }

    #[test]
    fn test_build_runner_keeps_spec() {
        let spec = TaskSpec::new("Security Review", "security", 0.2);
        let runner = build_runner(&spec).unwrap();
        assert_eq!(runner.name(), "Security Review");
        assert_eq!(runner.class(), TaskClass::Security);
        assert_eq!(runner.temperature(), 0.2);
    }

    #[test]
    fn test_known_keys() {
        assert_eq!(known_keys(), vec!["security", "quality"]);
    }
}
