use async_trait::async_trait;
use serde_json::{json, Value};

use diffscope_core::api::{BackendError, GenerateRequest, GenerationBackend};

use super::http::{build_client, empty_error, post_json};

/// Ollama chat endpoint, non-streaming.
#[derive(Clone)]
pub struct OllamaBackend {
    http: reqwest::Client,
    url_chat: String,
    model: String,
    api_key: String,
}

impl OllamaBackend {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            http: build_client(timeout_ms)?,
            url_chat: format!("{}/api/chat", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn payload(&self, request: &GenerateRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_output_tokens,
            },
        })
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError> {
        let url = &self.url_chat;
        tracing::debug!(
            target: "diffscope.backend",
            stage = "ollama.chat.in",
            url = %url,
            model = %self.model,
            system_len = request.system.len(),
            user_len = request.user.len(),
            temperature = request.temperature,
            num_predict = request.max_output_tokens
        );

        let resp = post_json(&self.http, url, &self.api_key, &self.payload(&request)).await?;
        let v = resp.json()?;
        let content = v
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| empty_error(resp.status, url))?;

        tracing::debug!(
            target: "diffscope.backend",
            stage = "ollama.chat.out",
            status = resp.status,
            content_len = content.len()
        );
        Ok(content.to_string())
    }
}
