//! Backend output normalization.
//!
//! Backend text is untrusted: it may be fenced in markdown, wrapped in prose, use
//! typographic quotes, or be cut off mid-document. [`normalize`] runs an ordered
//! chain of [`ParseTier`]s and returns the first tier's result that succeeds:
//!
//! ```text
//! raw text
//!   ↓
//! StrictTier   : fence strip → {…} slice → quote repair → serde_json
//!   ↓ (structural error)
//! FallbackTier : independent regex scans, zipped positionally
//!   ↓ (error)
//! []           : logged, never surfaced to the caller
//! ```

pub mod clean;
pub mod fallback;
pub mod strict;

use thiserror::Error;

use crate::review::Finding;

pub use fallback::{FallbackTier, FALLBACK_SUGGESTION};
pub use strict::{finding_from_value, StrictTier};

#[derive(Error, Debug)]
pub enum TierError {
    #[error("malformed JSON: {0}")]
    Structural(#[from] serde_json::Error),
}

/// One attempt at turning backend text into findings.
pub trait ParseTier: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, raw: &str) -> Result<Vec<Finding>, TierError>;
}

/// Normalize backend text with the standard strict → fallback chain.
pub fn normalize(raw: &str) -> Vec<Finding> {
    normalize_with(raw, &[&StrictTier, &FallbackTier])
}

/// Run `tiers` in order, returning the first successful result.
/// Returns an empty list when every tier fails.
pub fn normalize_with(raw: &str, tiers: &[&dyn ParseTier]) -> Vec<Finding> {
    for tier in tiers {
        match tier.parse(raw) {
            Ok(findings) => {
                tracing::debug!(
                    target: "diffscope.normalize",
                    tier = tier.name(),
                    count = findings.len(),
                    "normalized backend output"
                );
                return findings;
            }
            Err(e) => {
                tracing::warn!(
                    target: "diffscope.normalize",
                    tier = tier.name(),
                    error = %e,
                    preview = %preview(raw),
                    "parse tier failed"
                );
            }
        }
    }

    tracing::warn!(
        target: "diffscope.normalize",
        raw_len = raw.len(),
        "all parse tiers failed; returning no findings"
    );
    Vec::new()
}

const PREVIEW_LIMIT: usize = 200;

fn preview(raw: &str) -> String {
    let mut out: String = raw.chars().take(PREVIEW_LIMIT).collect();
    if raw.chars().count() > PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{Severity, DEFAULT_CONFIDENCE};
    use pretty_assertions::assert_eq;

    const CLEAN: &str = r#"{"findings": [{"severity": "high", "line_number": 4, "issue_type": "weak_crypto", "description": "md5 used for passwords", "suggestion": "use argon2", "confidence": 0.8}]}"#;

    struct AlwaysFails;

    impl ParseTier for AlwaysFails {
        fn name(&self) -> &'static str {
            "always-fails"
        }

        fn parse(&self, _raw: &str) -> Result<Vec<Finding>, TierError> {
            Err(serde_json::from_str::<serde_json::Value>("").unwrap_err().into())
        }
    }

    #[test]
    fn test_clean_json() {
        let findings = normalize(CLEAN);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].line_number, 4);
        assert_eq!(findings[0].suggestion, "use argon2");
    }

    #[test]
    fn test_fenced_typographic_matches_plain() {
        let fancy = "```json\n{\u{201C}findings\u{201D}: [{\u{201C}severity\u{201D}: \u{201C}high\u{201D}, \u{201C}line_number\u{201D}: 4, \u{201C}issue_type\u{201D}: \u{201C}weak_crypto\u{201D}, \u{201C}description\u{201D}: \u{201C}md5 used for passwords\u{201D}, \u{201C}suggestion\u{201D}: \u{201C}use argon2\u{201D}, \u{201C}confidence\u{201D}: 0.8}]}\n```";
        assert_eq!(normalize(fancy), normalize(CLEAN));
    }

    #[test]
    fn test_prose_wrapped_json() {
        let wrapped = format!(
            "Sure! Here is my analysis:\n\n{}\n\nLet me know if you need more.",
            CLEAN
        );
        assert_eq!(normalize(&wrapped), normalize(CLEAN));
    }

    #[test]
    fn test_empty_findings() {
        assert!(normalize(r#"{"findings": []}"#).is_empty());
    }

    #[test]
    fn test_truncated_json_uses_fallback() {
        let raw = r#"{"findings": [{"severity": "critical", "line_number": 2, "issue_type": "command_injection", "description": "user input reaches the shell", "suggestion": "#;
        let findings = normalize(raw);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].line_number, 2);
        assert_eq!(findings[0].suggestion, FALLBACK_SUGGESTION);
        assert_eq!(findings[0].confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_truncated_json_with_oversized_line_agrees_with_strict() {
        let entries = r#"{"severity": "high", "line_number": 2, "issue_type": "xss", "description": "unescaped html"}, {"severity": "low", "line_number": 99999999999, "issue_type": "style", "description": "long line"}"#;
        let truncated = format!(r#"{{"findings": [{}, {{"severity": "#, entries);
        let complete = format!(r#"{{"findings": [{}]}}"#, entries);

        let from_fallback: Vec<u32> = normalize(&truncated).iter().map(|f| f.line_number).collect();
        let from_strict: Vec<u32> = normalize(&complete).iter().map(|f| f.line_number).collect();
        assert_eq!(from_fallback, vec![2, u32::MAX]);
        assert_eq!(from_fallback, from_strict);
    }

    #[test]
    fn test_garbage_yields_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("The model is overloaded, try again later.").is_empty());
        assert!(normalize("{{{{ not json").is_empty());
    }

    #[test]
    fn test_invariants_hold_for_hostile_values() {
        let raw = r#"{"findings": [
            {"severity": "CATASTROPHIC", "confidence": 99},
            {"severity": null, "confidence": -3},
            {"confidence": "NaN"},
            {"severity": "Medium", "confidence": 1e308}
        ]}"#;
        let findings = normalize(raw);
        assert_eq!(findings.len(), 4);
        for f in &findings {
            assert!((0.0..=1.0).contains(&f.confidence));
            assert!(Severity::ALL.contains(&f.severity));
        }
        assert_eq!(findings[3].severity, Severity::Medium);
    }

    #[test]
    fn test_deterministic() {
        let raw = "```\n{\"findings\": [{\"severity\": \"low\", \"line_number\": 1}]}\n```";
        assert_eq!(normalize(raw), normalize(raw));
    }

    #[test]
    fn test_chain_exhaustion_returns_empty() {
        assert!(normalize_with(CLEAN, &[&AlwaysFails]).is_empty());
    }

    #[test]
    fn test_chain_short_circuits_on_success() {
        let findings = normalize_with(CLEAN, &[&AlwaysFails, &StrictTier, &AlwaysFails]);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(PREVIEW_LIMIT + 5);
        assert!(preview(&long).ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
