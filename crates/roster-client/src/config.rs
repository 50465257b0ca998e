use std::path::PathBuf;

use serde::Deserialize;

use crate::middleware::bearer::DEFAULT_EXCLUDED_PATHS;

/// API base baked in at build time via `ROSTER_API_URL`.
pub const BUILD_API_BASE: Option<&str> = option_env!("ROSTER_API_URL");
pub const FALLBACK_API_BASE: &str = "http://127.0.0.1:3000";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    pub users_base: String,
    pub credential_dir: PathBuf,
    pub excluded_paths: Vec<String>,
}

impl ClientConfig {
    /// Defaults derived from `api_base`: users live at `{api_base}/users`.
    pub fn for_api(api_base: impl Into<String>) -> Self {
        let apiBase = api_base.into().trim_end_matches('/').to_string();
        Self {
            users_base: format!("{apiBase}/users"),
            api_base: apiBase,
            credential_dir: PathBuf::from(".roster"),
            excluded_paths: DEFAULT_EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn from_build_env() -> Self {
        Self::for_api(BUILD_API_BASE.unwrap_or(FALLBACK_API_BASE))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Reads a TOML config, falling back to [`ClientConfig::default`] on any
/// failure. Keys left out of the file keep their default values; when only
/// `api_base` is given, `users_base` follows it.
pub fn load(path: &str) -> ClientConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("failed to read config {path}: {e}, using defaults");
            return ClientConfig::default();
        }
    };
    match parse(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("failed to parse config {path}: {e}, using defaults");
            ClientConfig::default()
        }
    }
}

pub fn parse(contents: &str) -> Result<ClientConfig, toml::de::Error> {
    let table: toml::Table = toml::from_str(contents)?;
    let mut config: ClientConfig = toml::from_str(contents)?;
    if table.contains_key("api_base") && !table.contains_key("users_base") {
        config.users_base = ClientConfig::for_api(config.api_base.clone()).users_base;
    }
    Ok(config)
}
