//! Application configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Keys accepted by [`Config::set`], as `section.key`.
pub const KNOWN_KEYS: [&str; 3] = ["jira.url", "jira.points_field", "user.token"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub jira: JiraConfig,
    pub user: UserConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JiraConfig {
    /// REST API base, e.g. `https://jira-api.com/jira/rest/api/2`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Custom field id holding story points on created sub-tasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_field: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl std::fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.jira.validate()?;
        self.user.validate()?;
        Ok(())
    }

    /// Look up a value by section and key, e.g. `get("jira", "url")`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        match (section, key) {
            ("jira", "url") => self.jira.url.as_deref(),
            ("jira", "points_field") => self.jira.points_field.as_deref(),
            ("user", "token") => self.user.token.as_deref(),
            _ => None,
        }
    }

    /// Set a value by section and key. Unknown keys are rejected.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) -> Result<()> {
        let slot = match (section, key) {
            ("jira", "url") => &mut self.jira.url,
            ("jira", "points_field") => &mut self.jira.points_field,
            ("user", "token") => &mut self.user.token,
            _ => {
                return Err(Error::Validation(format!(
                    "Unknown config key '{}.{}'. Must be one of: {}",
                    section,
                    key,
                    KNOWN_KEYS.join(", ")
                )))
            }
        };
        *slot = Some(value.into());
        Ok(())
    }
}

impl JiraConfig {
    /// Validate jira configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url) = self.url {
            if url.trim().is_empty() {
                return Err(Error::Validation("jira.url cannot be empty".to_string()));
            }

            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::Validation(format!(
                    "Invalid jira.url '{}'. Must start with http:// or https://",
                    url
                )));
            }
        }

        if let Some(ref field) = self.points_field {
            if field.trim().is_empty() {
                return Err(Error::Validation(
                    "jira.points_field cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl UserConfig {
    /// Validate user configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref token) = self.token {
            if token.trim().is_empty() {
                return Err(Error::Validation("user.token cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}
