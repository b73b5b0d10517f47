use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::executor::{default_concurrency_ceiling, DEFAULT_MAX_OUTPUT_TOKENS};
use crate::review::TaskSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    #[serde(default)]
    pub http_server: HttpServerConfig,

    /// Tasks run when the caller does not name any.
    #[serde(default = "default_tasks")]
    pub tasks: Vec<TaskSpec>,
}

fn default_tasks() -> Vec<TaskSpec> {
    vec![
        TaskSpec::new("Security", "security", 0.2),
        TaskSpec::new("Quality", "quality", 0.3),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            backend: BackendConfig::default(),
            dispatch: DispatchConfig::default(),
            http_server: HttpServerConfig::default(),
            tasks: default_tasks(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory`.
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "diffscope_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. Filled in with `~/.diffscope/logs` on load.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Ollama,
    AiService,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::AiService => "aiservice",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "aiservice" => Ok(Self::AiService),
            other => Err(format!("unknown backend kind: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    #[serde(default = "default_backend_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_backend_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_timeout_ms() -> u64 {
    120_000
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            base_url: default_backend_url(),
            model: default_model(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Hard cap on concurrently running tasks, whatever the caller asks for.
    #[serde(default = "default_concurrency_ceiling")]
    pub max_concurrency_ceiling: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency_ceiling: default_concurrency_ceiling(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_host")]
    pub host: String,

    #[serde(default = "default_http_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    300
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
