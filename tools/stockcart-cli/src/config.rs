//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use stockcart_observability::{LogConfig, LogFormat, LogLevel};
use stockcart_store::DEFAULT_CART_KEY;

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["stockcart.toml", ".stockcart.toml", "stockcart.json"];

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "STOCKCART_API_URL";

/// Overrides `storage.dir`.
pub const ENV_STORAGE_DIR: &str = "STOCKCART_STORAGE_DIR";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Stock and catalog service.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the cart snapshot lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides, reading variables through `var`.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(dir) = var(ENV_STORAGE_DIR).filter(|v| !v.is_empty()) {
            self.storage.dir = dir;
        }
    }

    /// Read a value by dotted key.
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Ok(self.api.base_url.clone()),
            ["api", "timeout_ms"] => Ok(self.api.timeout_ms.to_string()),
            ["storage", "dir"] => Ok(self.storage.dir.clone()),
            ["storage", "key"] => Ok(self.storage.key.clone()),
            ["logging", "level"] => Ok(self.logging.level.to_string()),
            ["logging", "format"] => Ok(match self.logging.format {
                LogFormat::Json => "json".to_string(),
                LogFormat::Human => "human".to_string(),
            }),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    /// Set a value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => self.api.base_url = value.to_string(),
            ["api", "timeout_ms"] => {
                self.api.timeout_ms = value
                    .parse()
                    .with_context(|| format!("Invalid timeout: {}", value))?
            }
            ["storage", "dir"] => self.storage.dir = value.to_string(),
            ["storage", "key"] => self.storage.key = value.to_string(),
            ["logging", "level"] => self.logging.level = value.parse::<LogLevel>()?,
            ["logging", "format"] => {
                self.logging.format = match value {
                    "json" => LogFormat::Json,
                    "human" => LogFormat::Human,
                    other => bail!("Invalid log format: {} (expected json or human)", other),
                }
            }
            _ => bail!("Unknown config key: {}", key),
        }

        Ok(())
    }

    /// Problems that would stop the cart from opening.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            errors.push(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            ));
        }
        if self.api.timeout_ms == 0 {
            errors.push("api.timeout_ms must be greater than 0".to_string());
        }
        if self.storage.dir.is_empty() {
            errors.push("storage.dir is required".to_string());
        }
        if self.storage.key.is_empty() {
            errors.push("storage.key is required".to_string());
        }

        errors
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Stock and catalog service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/stock/{id}` and `/products/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding snapshot files, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_dir() -> String {
    ".stockcart".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

/// Generate a default stockcart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# StockCart configuration

[api]
base_url = "{base_url}"
timeout_ms = {timeout_ms}

[storage]
dir = "{dir}"
key = "{key}"

[logging]
level = "info"
format = "human"
"#,
        base_url = default_base_url(),
        timeout_ms = default_timeout_ms(),
        dir = default_storage_dir(),
        key = default_storage_key(),
    )
}
