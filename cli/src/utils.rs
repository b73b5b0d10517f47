use std::path::Path;

use diffscope_core::api::TaskSpec;
use diffscope_core::review::DEFAULT_TEMPERATURE;

/// Parse `NAME=CLASS[:TEMPERATURE]`.
///
/// The class key is not checked here; unknown classes are rejected by the
/// dispatcher so the CLI and HTTP paths fail the same way.
pub fn parse_task_arg(raw: &str) -> Result<TaskSpec, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid task '{raw}' (expected NAME=CLASS[:TEMPERATURE])"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid task '{raw}' (empty name)"));
    }

    let (class, temperature) = match rest.split_once(':') {
        Some((class, temp)) => {
            let temperature = temp
                .trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid temperature in task '{raw}': {e}"))?;
            (class, temperature)
        }
        None => (rest, DEFAULT_TEMPERATURE),
    };
    let class = class.trim();
    if class.is_empty() {
        return Err(format!("invalid task '{raw}' (empty class)"));
    }

    Ok(TaskSpec::new(name, class, temperature))
}

/// Map a file extension to the language tag shown in review instructions.
pub fn infer_language(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let lang = match ext.as_str() {
        "py" => "python",
        "rs" => "rust",
        "go" => "go",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "rb" => "ruby",
        "php" => "php",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "swift" => "swift",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        _ => "text",
    };
    lang.to_string()
}
