//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use stockcart_cache::FileStore;
use stockcart_data::{CatalogApi, FetchClient};
use stockcart_store::CartStore;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::{ConsoleAlertSink, Output};

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        config.apply_env(|name| std::env::var(name).ok());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Open the cart store described by the configuration.
    pub fn open_store(&self) -> Result<CartStore> {
        let api = &self.config.api;
        let client =
            FetchClient::with_timeout(&api.base_url, Duration::from_millis(api.timeout_ms))
                .with_context(|| format!("Invalid API URL: {}", api.base_url))?;
        let api = Arc::new(CatalogApi::new(client));

        let dir = self.storage_dir();
        let snapshots = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage directory: {}", dir.display()))?;
        debug!(dir = %dir.display(), key = %self.config.storage.key, "opening cart");

        Ok(CartStore::open_with_key(
            &self.config.storage.key,
            snapshots,
            api.clone(),
            api,
            ConsoleAlertSink::new(self.output.clone()),
        ))
    }

    /// Directory the cart snapshot is stored in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or its ancestors.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
