//! Configuration manager

use std::path::PathBuf;

use jisub_core::{
    models::Config,
    storage::{config::parse_assignment, get_config_dir, ConfigStorage},
    Result as CoreResult,
};
use jisub_jira::JiraClient;

/// Config manager error
#[derive(Debug, thiserror::Error)]
pub enum ConfigManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] jisub_core::Error),

    #[error("error creating jira client: {0}")]
    Client(#[from] jisub_jira::Error),
}

pub type Result<T> = std::result::Result<T, ConfigManagerError>;

/// Loads and persists the jisub configuration file
pub struct ConfigManager {
    storage: ConfigStorage,
}

impl ConfigManager {
    /// Use `config_dir`, or the platform config directory when `None`.
    pub fn new(config_dir: Option<PathBuf>) -> CoreResult<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => get_config_dir()?,
        };

        Ok(Self {
            storage: ConfigStorage::new(config_dir),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.storage.path()
    }

    pub fn get(&self) -> Result<Config> {
        Ok(self.storage.load()?)
    }

    /// Apply a `section.key value` assignment. Returns the `section.key`
    /// that was written.
    pub fn update(&self, assignment: &str) -> Result<String> {
        let (section, key, _) = parse_assignment(assignment)?;
        let name = format!("{}.{}", section, key);

        self.storage.update(assignment)?;
        tracing::info!(key = %name, path = %self.path().display(), "config updated");

        Ok(name)
    }

    /// Build an API client from the stored configuration
    pub fn client(&self) -> Result<JiraClient> {
        let config = self.get()?;
        Ok(JiraClient::from_config(&config)?)
    }
}
