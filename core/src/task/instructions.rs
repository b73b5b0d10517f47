//! Instruction text for each task class.

use crate::review::AnalysisRequest;

/// Builds the system and user instructions for one kind of review.
pub trait InstructionStrategy: Send + Sync {
    fn system_prompt(&self) -> String;
    fn user_prompt(&self, request: &AnalysisRequest) -> String;
}

const OUTPUT_CONTRACT: &str = r#"Respond with JSON only, using double quotes for every string:
{
  "findings": [
    {
      "severity": "critical|high|medium|low",
      "line_number": <line in NEW CODE, counting from 1>,
      "issue_type": "short_snake_case_category",
      "description": "what is wrong, quoting the exact code element",
      "suggestion": "a concrete fix",
      "confidence": <number between 0.0 and 1.0>
    }
  ]
}
Escape quotes inside strings and do not use backticks.
If there is nothing to report, respond with: {"findings": []}"#;

fn code_change_block(request: &AnalysisRequest) -> String {
    let lang = request.language.as_str();
    format!(
        "File: {path}\nLanguage: {lang}\n\nOLD CODE:\n```{lang}\n{old}\n```\n\nNEW CODE:\n```{lang}\n{new}\n```",
        path = request.file_path,
        lang = lang,
        old = request.old_code,
        new = request.new_code,
    )
}

pub struct SecurityInstructions;

impl InstructionStrategy for SecurityInstructions {
    fn system_prompt(&self) -> String {
        format!(
            "You are an application security reviewer.\n\
             Report only vulnerabilities that actually exist in the code, with exact line numbers \
             and the real identifiers involved.\n\
             Look for: injection (SQL, command, path traversal, XSS, eval), hardcoded secrets, \
             missing authentication or authorization checks, weak or misused cryptography, \
             insecure randomness, sensitive data exposure, unsafe deserialization and insecure \
             defaults.\n\
             Severity: critical = remote code execution, injection, auth bypass, hardcoded secrets; \
             high = XSS, IDOR, weak crypto, missing auth checks; medium = information disclosure, \
             weak validation; low = hardening advice.\n\
             Do not report style, naming or performance issues.\n\n{}",
            OUTPUT_CONTRACT
        )
    }

    fn user_prompt(&self, request: &AnalysisRequest) -> String {
        format!(
            "Perform a security review of this code change.\n\n{}\n\n\
             Report SECURITY VULNERABILITIES ONLY. Return only JSON, no markdown.",
            code_change_block(request)
        )
    }
}

pub struct QualityInstructions;

impl InstructionStrategy for QualityInstructions {
    fn system_prompt(&self) -> String {
        format!(
            "You are a senior engineer reviewing code quality.\n\
             Report only issues that actually exist, with exact line numbers and the real \
             identifiers involved. Check language semantics before reporting: do not flag error \
             handling for calls that cannot fail.\n\
             Look for: unclear names, missing documentation on exported items, missing input \
             validation, ignored errors, dead or duplicated code, and needless complexity.\n\n{}",
            OUTPUT_CONTRACT
        )
    }

    fn user_prompt(&self, request: &AnalysisRequest) -> String {
        format!(
            "Review this code change for quality issues.\n\n{}\n\n\
             Return only JSON with proper escaping, no markdown.",
            code_change_block(request)
        )
    }
}
