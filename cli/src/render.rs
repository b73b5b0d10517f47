//! Human-readable rendering of review results.

use std::fmt::Write;

use diffscope_core::api::AggregateResult;

pub fn render_text(result: &AggregateResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Review {}", result.request_id);
    let _ = writeln!(out, "{}", result.summary);

    for outcome in &result.outcomes {
        let _ = writeln!(
            out,
            "\n[{}] {} finding(s) in {:.2}s",
            outcome.task_name,
            outcome.findings.len(),
            outcome.duration_secs
        );
        for f in &outcome.findings {
            let _ = writeln!(
                out,
                "  {:<8} line {:<4} {} (confidence {:.2})",
                f.severity.as_str().to_ascii_uppercase(),
                f.line_number,
                f.issue_type,
                f.confidence
            );
            if !f.description.is_empty() {
                let _ = writeln!(out, "    {}", f.description);
            }
            if !f.suggestion.is_empty() {
                let _ = writeln!(out, "    fix: {}", f.suggestion);
            }
        }
    }

    if !result.failed_tasks.is_empty() {
        let _ = writeln!(out, "\nFailed tasks: {}", result.failed_tasks.join(", "));
    }

    out
}
