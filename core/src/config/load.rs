use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::AppConfig;

/// Get the default diffscope data directory: ~/.diffscope
pub fn get_diffscope_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".diffscope"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.diffscope/config.toml
    let data_dir = get_diffscope_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        let logs_dir = data_dir.join("logs");
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    apply_env_overrides_with(&mut cfg, |key| std::env::var(key).ok())?;

    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}

/// Apply `DIFFSCOPE_*` overrides, reading variables through `lookup`.
/// Blank values are ignored.
pub fn apply_env_overrides_with<F>(cfg: &mut AppConfig, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("DIFFSCOPE_BACKEND_KIND") {
        cfg.backend.kind = v.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(v) = get("DIFFSCOPE_BACKEND_URL") {
        cfg.backend.base_url = v;
    }
    if let Some(v) = get("DIFFSCOPE_MODEL") {
        cfg.backend.model = v;
    }
    if let Some(v) = get("DIFFSCOPE_API_KEY") {
        cfg.backend.api_key = v;
    }

    Ok(())
}
