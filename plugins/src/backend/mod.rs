mod http;

pub mod aiservice;
pub mod ollama;

pub use aiservice::AiServiceBackend;
pub use ollama::OllamaBackend;
