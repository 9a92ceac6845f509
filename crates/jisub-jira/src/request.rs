//! Request bodies for issue creation and update
//!
//! Each document borrows from the parent issue and the parsed mapping and
//! serializes to the JSON shape the issue endpoints expect.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{mapping::Mapping, types::StoryPoints, Error, Issue, Result};

/// Issue type name the server uses for sub-tasks
pub const SUB_TASK_TYPE: &str = "Sub-task";

/// `POST /issue`
#[derive(Debug, Serialize)]
pub struct SubTaskDocument<'a> {
    pub fields: SubTaskFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct SubTaskFields<'a> {
    pub project: ProjectRef<'a>,
    pub parent: ParentRef<'a>,
    pub summary: String,
    #[serde(rename = "issuetype")]
    pub issue_type: IssueTypeRef,
    /// Story points under the configured custom field id
    #[serde(flatten)]
    pub points: BTreeMap<&'a str, StoryPoints>,
}

#[derive(Debug, Serialize)]
pub struct ProjectRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ParentRef<'a> {
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub struct IssueTypeRef {
    pub name: &'static str,
}

/// `POST /issue/bulk`
#[derive(Debug, Serialize)]
pub struct BulkSubTaskDocument<'a> {
    #[serde(rename = "issueUpdates")]
    pub issue_updates: Vec<SubTaskDocument<'a>>,
}

/// `PUT /issue/{key}`
#[derive(Debug, Serialize)]
pub struct FieldUpdateDocument<'a> {
    pub fields: &'a Mapping,
}

/// Parent issues must carry a key before anything is sent for them.
pub fn require_key(parent: &Issue) -> Result<&str> {
    if parent.key.trim().is_empty() {
        return Err(Error::Validation("missing required issue key".to_string()));
    }
    Ok(&parent.key)
}

fn require_project(parent: &Issue) -> Result<&str> {
    parent.project_id().ok_or_else(|| {
        Error::Validation(format!(
            "issue {} has no project, cannot create sub-tasks",
            parent.key
        ))
    })
}

fn summary_for(parent: &Issue, prefix: &str) -> String {
    match parent.summary().filter(|summary| !summary.is_empty()) {
        Some(summary) => format!("{} - {}", prefix, summary),
        None => prefix.to_string(),
    }
}

pub fn sub_task<'a>(
    parent: &'a Issue,
    summary_prefix: &str,
    points: StoryPoints,
    points_field: &'a str,
) -> Result<SubTaskDocument<'a>> {
    let key = require_key(parent)?;
    let project_id = require_project(parent)?;

    Ok(SubTaskDocument {
        fields: SubTaskFields {
            project: ProjectRef { id: project_id },
            parent: ParentRef { key },
            summary: summary_for(parent, summary_prefix),
            issue_type: IssueTypeRef {
                name: SUB_TASK_TYPE,
            },
            points: BTreeMap::from([(points_field, points)]),
        },
    })
}

/// One sub-task per breakdown entry, in mapping order. The label becomes the
/// summary prefix and the value the story points.
pub fn sub_tasks_bulk<'a>(
    parent: &'a Issue,
    breakdown: &Mapping,
    points_field: &'a str,
) -> Result<BulkSubTaskDocument<'a>> {
    let issue_updates = breakdown
        .iter()
        .map(|(label, value)| {
            let points = StoryPoints::parse(label, value)?;
            sub_task(parent, label, points, points_field)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BulkSubTaskDocument { issue_updates })
}

pub fn field_update<'a>(parent: &Issue, fields: &'a Mapping) -> Result<FieldUpdateDocument<'a>> {
    require_key(parent)?;
    Ok(FieldUpdateDocument { fields })
}

/// Serialize a document into a request body.
pub fn to_body<T: Serialize>(document: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(document)
        .map_err(|e| Error::Config(format!("failed to render request body: {}", e)))
}
