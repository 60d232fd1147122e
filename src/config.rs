use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api3.codebasehq.com";

pub const ENV_API_USER: &str = "CODEBASE_API_USER";
pub const ENV_API_TOKEN: &str = "CODEBASE_API_TOKEN";
pub const ENV_API_URL: &str = "CODEBASE_API_URL";

/// Optional on-disk settings. Every field can also come from the environment.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub api_user: Option<String>,
    pub api_token: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_user: String,
    pub api_token: String,
    pub base_url: String,
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ticket-migrate")
        .join("config.toml")
}

fn load_file_config() -> Result<FileConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: FileConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

pub fn load_config() -> Result<ApiConfig> {
    let file = load_file_config()?;
    resolve(file, |key| std::env::var(key).ok())
}

/// Merge the file settings with environment lookups. Environment values win;
/// blank values count as unset.
pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<ApiConfig> {
    let pick = |key: &str, fallback: Option<String>| {
        env(key)
            .or(fallback)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let Some(api_user) = pick(ENV_API_USER, file.api_user) else {
        bail!("Missing API user: set {ENV_API_USER} or api_user in {}", config_path().display());
    };
    let Some(api_token) = pick(ENV_API_TOKEN, file.api_token) else {
        bail!("Missing API token: set {ENV_API_TOKEN} or api_token in {}", config_path().display());
    };
    let base_url = pick(ENV_API_URL, file.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    Ok(ApiConfig {
        api_user,
        api_token,
        base_url,
    })
}
