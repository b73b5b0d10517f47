use serde_json::{Map, Value};

use crate::review::{
    clamp_confidence, Finding, Severity, DEFAULT_CONFIDENCE, DEFAULT_ISSUE_TYPE,
};

use super::clean::{extract_json_object, fix_typographic_quotes, strip_code_fence};
use super::{ParseTier, TierError};

/// Clean the text and parse it as a `{"findings": [...]}` document.
pub struct StrictTier;

impl ParseTier for StrictTier {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn parse(&self, raw: &str) -> Result<Vec<Finding>, TierError> {
        let candidate = fix_typographic_quotes(extract_json_object(strip_code_fence(raw)));
        let document: Value = serde_json::from_str(&candidate)?;

        let Some(entries) = document.get("findings").and_then(Value::as_array) else {
            tracing::debug!(
                target: "diffscope.normalize",
                "parsed JSON has no findings array; treating as no findings"
            );
            return Ok(Vec::new());
        };

        let mut findings = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match finding_from_value(entry) {
                Ok(finding) => findings.push(finding),
                Err(reason) => {
                    tracing::warn!(
                        target: "diffscope.normalize",
                        index,
                        entry = %entry,
                        "skipping finding entry: {}",
                        reason
                    );
                }
            }
        }

        Ok(findings)
    }
}

/// Map one JSON entry into a [`Finding`], defaulting missing or ill-typed fields.
pub fn finding_from_value(entry: &Value) -> Result<Finding, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| format!("expected a JSON object, got {}", json_type(entry)))?;

    Ok(Finding {
        severity: obj
            .get("severity")
            .and_then(Value::as_str)
            .map(Severity::from_label)
            .unwrap_or_default(),
        line_number: obj.get("line_number").map(coerce_line_number).unwrap_or(0),
        issue_type: text_field(obj, "issue_type")
            .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
        description: text_field(obj, "description").unwrap_or_default(),
        suggestion: text_field(obj, "suggestion").unwrap_or_default(),
        confidence: obj
            .get("confidence")
            .and_then(coerce_f64)
            .map(clamp_confidence)
            .unwrap_or(DEFAULT_CONFIDENCE),
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_line_number(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(truncate_non_negative)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_non_negative))
        }
        _ => None,
    };
    raw.map(|n| u32::try_from(n).unwrap_or(u32::MAX)).unwrap_or(0)
}

fn truncate_non_negative(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f.trunc() as u64
    } else {
        0
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
