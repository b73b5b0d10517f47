use serde::{Deserialize, Serialize};

use super::types::{DispatchReport, Severity, TaskOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Caller-facing rollup of one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub request_id: String,
    pub outcomes: Vec<TaskOutcome>,
    pub total_findings: usize,
    pub severity_counts: SeverityCounts,
    /// Names of tasks dropped from `outcomes` because their execution failed.
    pub failed_tasks: Vec<String>,
    pub summary: String,
}

impl AggregateResult {
    pub fn from_report(request_id: impl Into<String>, report: DispatchReport) -> Self {
        let mut severity_counts = SeverityCounts::default();
        for finding in report.outcomes.iter().flat_map(|o| o.findings.iter()) {
            severity_counts.record(finding.severity);
        }

        let failed_tasks: Vec<String> = report
            .failures
            .into_iter()
            .map(|f| f.task_name)
            .collect();
        let summary = summarize(report.outcomes.len(), &severity_counts, &failed_tasks);

        Self {
            request_id: request_id.into(),
            total_findings: severity_counts.total(),
            outcomes: report.outcomes,
            severity_counts,
            failed_tasks,
            summary,
        }
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn summarize(completed: usize, counts: &SeverityCounts, failed: &[String]) -> String {
    if completed == 0 && failed.is_empty() {
        return "No review tasks were run.".to_string();
    }

    let mut summary = format!(
        "{} across {}",
        plural(counts.total(), "finding"),
        plural(completed, "completed task")
    );

    let breakdown: Vec<String> = Severity::ALL
        .iter()
        .filter(|s| counts.get(**s) > 0)
        .map(|s| format!("{} {}", counts.get(*s), s))
        .collect();
    if !breakdown.is_empty() {
        summary.push_str(&format!(" ({})", breakdown.join(", ")));
    }

    if !failed.is_empty() {
        summary.push_str(&format!(
            "; {} failed: {}",
            plural(failed.len(), "task"),
            failed.join(", ")
        ));
    }

    summary.push('.');
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::types::{Finding, TaskFailure};
    use pretty_assertions::assert_eq;

    fn finding(severity: Severity) -> Finding {
        Finding {
            severity,
            ..Finding::default()
        }
    }

    fn outcome(name: &str, findings: Vec<Finding>) -> TaskOutcome {
        TaskOutcome {
            task_name: name.to_string(),
            findings,
            duration_secs: 0.1,
        }
    }

    #[test]
    fn test_counts_and_summary() {
        let report = DispatchReport {
            outcomes: vec![
                outcome(
                    "Security",
                    vec![finding(Severity::Critical), finding(Severity::High)],
                ),
                outcome("Quality", vec![finding(Severity::Low)]),
            ],
            failures: vec![],
        };
        let agg = AggregateResult::from_report("req-1", report);

        assert_eq!(agg.total_findings, 3);
        assert_eq!(agg.severity_counts.critical, 1);
        assert_eq!(agg.severity_counts.high, 1);
        assert_eq!(agg.severity_counts.medium, 0);
        assert_eq!(agg.severity_counts.low, 1);
        assert_eq!(
            agg.summary,
            "3 findings across 2 completed tasks (1 critical, 1 high, 1 low)."
        );
    }

    #[test]
    fn test_failed_tasks_are_reported() {
        let report = DispatchReport {
            outcomes: vec![outcome("Quality", vec![])],
            failures: vec![TaskFailure {
                task_name: "Security".into(),
                error: "backend error kind=connect: refused".into(),
            }],
        };
        let agg = AggregateResult::from_report("req-2", report);

        assert_eq!(agg.failed_tasks, vec!["Security".to_string()]);
        assert_eq!(
            agg.summary,
            "0 findings across 1 completed task; 1 task failed: Security."
        );
    }

    #[test]
    fn test_empty_report() {
        let agg = AggregateResult::from_report("req-3", DispatchReport::default());
        assert_eq!(agg.total_findings, 0);
        assert!(agg.outcomes.is_empty());
        assert_eq!(agg.summary, "No review tasks were run.");
    }
}
