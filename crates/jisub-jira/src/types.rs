//! JIRA API types

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(rename = "self", deserialize_with = "null_as_default")]
    pub self_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<IssueFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueFields {
    pub summary: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub subtasks: Vec<Issue>,
    pub status: Option<JiraStatus>,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueType>,
    pub project: Option<JiraProject>,
    #[serde(deserialize_with = "labels_skip_null")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueType {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtask: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraProject {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
}

/// Result of a bulk create. Empty when nothing was requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issues {
    #[serde(deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
}

impl Issue {
    pub fn summary(&self) -> Option<&str> {
        self.fields.as_ref()?.summary.as_deref()
    }

    pub fn status_name(&self) -> Option<&str> {
        self.fields
            .as_ref()?
            .status
            .as_ref()
            .map(|status| status.name.as_str())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.fields
            .as_ref()?
            .project
            .as_ref()
            .map(|project| project.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

impl Issues {
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.key.as_str())
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Story points, rendered as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StoryPoints(serde_json::Number);

impl StoryPoints {
    /// Parse the points value of a breakdown entry.
    pub fn parse(label: &str, value: &str) -> Result<Self> {
        let invalid = || Error::InvalidPoints {
            label: label.to_string(),
            value: value.to_string(),
        };

        let number: serde_json::Number = serde_json::from_str(value).map_err(|_| invalid())?;
        match number.as_f64() {
            Some(points) if points >= 0.0 => Ok(Self(number)),
            _ => Err(invalid()),
        }
    }
}

impl From<u32> for StoryPoints {
    fn from(points: u32) -> Self {
        Self(points.into())
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Null labels, and a null list, are dropped.
fn labels_skip_null<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(labels.into_iter().flatten().flatten().collect())
}
