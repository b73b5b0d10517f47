use thiserror::Error;

use super::backend::BackendError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("review failed: {0}")]
    Review(#[from] ReviewError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Errors raised while resolving or running review tasks.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The caller asked for a task class that has no implementation.
    /// Raised before any backend call is made.
    #[error("unknown task class: '{0}'")]
    UnknownTaskClass(String),

    #[error("task '{task}' backend call failed: {source}")]
    Backend {
        task: String,
        #[source]
        source: BackendError,
    },

    #[error("task '{task}' aborted: {detail}")]
    TaskAborted { task: String, detail: String },
}

impl ReviewError {
    /// Configuration mistakes abort a whole batch; everything else is per-task.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownTaskClass(_))
    }
}
