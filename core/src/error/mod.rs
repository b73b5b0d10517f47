#[allow(clippy::module_inception)]
pub mod error;
pub mod backend;

pub use backend::{BackendError, BackendErrorKind};
pub use error::{CliError, ReviewError};
