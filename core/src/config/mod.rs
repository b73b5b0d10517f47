mod load;
mod types;

pub use load::{
    apply_env_overrides_with, get_diffscope_data_dir, load_default, load_from_path,
};
pub use types::{
    AppConfig, BackendConfig, BackendKind, DispatchConfig, HttpServerConfig, LoggingConfig,
};
