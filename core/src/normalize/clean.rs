//! Text cleanup applied before strict JSON parsing.

const FENCE: &str = "```";

/// Strip a leading fence marker (with optional language tag) and a trailing fence marker.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = match rest.find('\n') {
            Some(nl) if is_language_tag(&rest[..nl]) => &rest[nl + 1..],
            _ => rest,
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}

/// Slice from the first `{` to the last `}`; the input is returned unchanged when no
/// such span exists.
pub fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &text[start..=end],
        _ => text,
    }
}

/// Replace typographic quote variants with ASCII quotes.
pub fn fix_typographic_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' | '`' => '\'',
            other => other,
        })
        .collect()
}
