use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod path_resolver;

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Contents of `config.json`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchConfig {
    pub openai_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub read_only_sql: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    crate::providers::llm::openai::DEFAULT_BASE_URL.to_string()
}

// keeps the key out of logs
impl std::fmt::Debug for BenchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchConfig")
            .field("openai_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("read_only_sql", &self.read_only_sql)
            .finish()
    }
}

pub fn load_config(path: &Path) -> Result<BenchConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    parse_config(&raw)
        .map_err(|ConfigError(msg)| ConfigError(format!("{} (file: {})", msg, path.display())))
}

pub fn parse_config(raw: &str) -> Result<BenchConfig, ConfigError> {
    let mut ignored_keys = Vec::new();
    let mut de = serde_json::Deserializer::from_str(raw);
    let cfg: BenchConfig = serde_ignored::deserialize(&mut de, |path| {
        ignored_keys.push(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse JSON: {}", e)))?;
    de.end()
        .map_err(|e| ConfigError(format!("failed to parse JSON: {}", e)))?;

    if !ignored_keys.is_empty() {
        tracing::warn!(event = "config_unknown_fields", fields = ?ignored_keys);
    }

    if cfg.openai_key.trim().is_empty() {
        return Err(ConfigError("openaiKey must not be empty".into()));
    }
    if cfg.model.trim().is_empty() {
        return Err(ConfigError("model must not be empty".into()));
    }
    if cfg.timeout_seconds == Some(0) {
        return Err(ConfigError("timeoutSeconds must be greater than 0".into()));
    }

    Ok(cfg)
}
