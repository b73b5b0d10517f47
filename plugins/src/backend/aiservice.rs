use async_trait::async_trait;
use serde_json::{json, Value};

use diffscope_core::api::{BackendError, GenerateRequest, GenerationBackend};

use super::http::{build_client, empty_error, post_json};

/// Generic text-generation HTTP endpoint.
///
/// Accepts `{text}`, `{stdout}`, `{response}` or OpenAI-style
/// `{choices:[{message:{content}}]}` replies; anything else is returned as
/// the raw body.
#[derive(Clone)]
pub struct AiServiceBackend {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl AiServiceBackend {
    pub fn new(
        url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("aiservice backend must be a URL (http/https), got: {}", url);
        }
        Ok(Self {
            http: build_client(timeout_ms)?,
            url: url.to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }
}

fn extract_textish(v: &Value) -> Option<String> {
    for key in ["text", "stdout", "response"] {
        if let Some(s) = v.get(key).and_then(|x| x.as_str()) {
            return Some(s.to_string());
        }
    }
    // OpenAI-ish: { choices: [ { message: { content: "..." } } ] }
    v.get("choices")
        .and_then(|x| x.get(0))
        .and_then(|x| x.get("message"))
        .and_then(|x| x.get("content"))
        .and_then(|x| x.as_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl GenerationBackend for AiServiceBackend {
    fn name(&self) -> &str {
        "aiservice"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError> {
        let url = &self.url;
        tracing::debug!(
            target: "diffscope.backend",
            stage = "aiservice.generate.in",
            url = %url,
            model = %self.model,
            prompt_len = request.user.len()
        );

        let payload = json!({
            "system": request.system,
            "prompt": request.user,
            "model": self.model,
            "temperature": request.temperature,
            "max_tokens": request.max_output_tokens,
        });
        let resp = post_json(&self.http, url, &self.api_key, &payload).await?;

        let text = serde_json::from_str::<Value>(&resp.body)
            .ok()
            .and_then(|v| extract_textish(&v))
            .unwrap_or_else(|| resp.body.clone());
        if text.trim().is_empty() {
            return Err(empty_error(resp.status, url));
        }

        tracing::debug!(
            target: "diffscope.backend",
            stage = "aiservice.generate.out",
            status = resp.status,
            text_len = text.len()
        );
        Ok(text)
    }
}
