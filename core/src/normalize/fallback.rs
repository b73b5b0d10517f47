use lazy_static::lazy_static;
use regex::Regex;

use crate::review::{Finding, Severity, DEFAULT_CONFIDENCE};

use super::{ParseTier, TierError};

pub const FALLBACK_SUGGESTION: &str = "See description for details";

lazy_static! {
    static ref SEVERITY_RE: Regex =
        Regex::new(r#""severity"\s*:\s*"(\w+)""#).expect("severity regex is valid");
    static ref LINE_RE: Regex =
        Regex::new(r#""line_number"\s*:\s*(\d+)"#).expect("line_number regex is valid");
    static ref ISSUE_RE: Regex =
        Regex::new(r#""issue_type"\s*:\s*"([^"]+)""#).expect("issue_type regex is valid");
    static ref DESCRIPTION_RE: Regex =
        Regex::new(r#""description"\s*:\s*"([^"]+)""#).expect("description regex is valid");
}

/// Field-by-field regex scan for output too broken to parse as JSON.
///
/// Each field is scanned independently and the results are zipped positionally,
/// so an entry missing any of the four fields shortens the output instead of
/// producing a mixed-up finding.
pub struct FallbackTier;

impl ParseTier for FallbackTier {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn parse(&self, raw: &str) -> Result<Vec<Finding>, TierError> {
        let severities = captures(&SEVERITY_RE, raw);
        let issues = captures(&ISSUE_RE, raw);
        let descriptions = captures(&DESCRIPTION_RE, raw);
        let lines: Vec<u32> = captures(&LINE_RE, raw)
            .into_iter()
            .map(saturating_line_number)
            .collect();

        let findings: Vec<Finding> = severities
            .iter()
            .zip(lines)
            .zip(issues.iter())
            .zip(descriptions.iter())
            .map(|(((severity, line_number), issue_type), description)| Finding {
                severity: Severity::from_label(severity),
                line_number,
                issue_type: issue_type.to_string(),
                description: description.to_string(),
                suggestion: FALLBACK_SUGGESTION.to_string(),
                confidence: DEFAULT_CONFIDENCE,
            })
            .collect();

        if !findings.is_empty() {
            tracing::info!(
                target: "diffscope.normalize",
                count = findings.len(),
                "fallback scan extracted findings"
            );
        }

        Ok(findings)
    }
}

/// `\d+` always matches, so the only failure left is overflow.
fn saturating_line_number(digits: &str) -> u32 {
    digits
        .parse::<u64>()
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(u32::MAX)
}

fn captures<'a>(re: &Regex, text: &'a str) -> Vec<&'a str> {
    re.captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}
