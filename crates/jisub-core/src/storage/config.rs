//! Configuration storage operations

use crate::{models::Config, Error, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

pub struct ConfigStorage {
    config_dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load the stored config. A missing or empty file yields the default.
    pub fn load(&self) -> Result<Config> {
        let config_path = self.path();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(config_path)?;

        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(self.path(), content)?;

        Ok(())
    }

    /// Apply a `section.key value` assignment and persist it.
    ///
    /// Returns the updated config.
    pub fn update(&self, assignment: &str) -> Result<Config> {
        let (section, key, value) = parse_assignment(assignment)?;

        let mut config = self.load()?;
        config.set(section, key, value)?;
        config.validate()?;
        self.save(&config)?;

        Ok(config)
    }
}

/// Split `"jira.url https://..."` into `("jira", "url", "https://...")`.
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str, &str)> {
    let (name, value) = assignment
        .trim()
        .split_once(' ')
        .map(|(name, value)| (name, value.trim()))
        .filter(|(_, value)| !value.is_empty())
        .ok_or_else(|| Error::Validation("wrong number of arguments provided".to_string()))?;

    let (section, key) = name
        .split_once('.')
        .filter(|(section, key)| !section.is_empty() && !key.is_empty())
        .ok_or_else(|| {
            Error::Validation("incorrect value format, expect: section.key".to_string())
        })?;

    Ok((section, key, value))
}
