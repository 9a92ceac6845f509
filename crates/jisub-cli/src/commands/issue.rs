//! Fetch an issue, then create sub-tasks under it and/or update its fields

use anyhow::{Context, Result};
use jisub_jira::{Issue, JiraClient, Mapping};
use std::io::Write;

/// What to do with a parent issue
#[derive(Debug, Clone, Default)]
pub struct IssueCommand {
    pub key: String,
    pub sub_tasks: Option<String>,
    pub fields: Option<String>,
}

impl IssueCommand {
    pub async fn run(&self, client: &JiraClient, out: &mut impl Write) -> Result<()> {
        // Reject malformed arguments before talking to the server
        let breakdown = parse_arg(self.sub_tasks.as_deref())
            .with_context(|| format!("invalid sub tasks {:?}", self.sub_tasks_arg()))?;
        let fields = parse_arg(self.fields.as_deref())
            .with_context(|| format!("invalid fields {:?}", self.fields_arg()))?;

        let issue = client
            .get_issue(&self.key)
            .await
            .with_context(|| format!("issue not found {}", self.key))?;
        tracing::debug!(key = %issue.key, "fetched parent issue");

        if breakdown.is_empty() && fields.is_empty() {
            print_issue(&issue, out)?;
            return Ok(());
        }

        if !breakdown.is_empty() {
            let created = client
                .create_sub_tasks(&issue, &breakdown)
                .await
                .with_context(|| {
                    format!(
                        "error creating sub tasks {:?} for {}",
                        self.sub_tasks_arg(),
                        self.key
                    )
                })?;

            writeln!(out, "sub tasks:")?;
            for key in created.keys() {
                writeln!(out, "{}", key)?;
            }
        }

        if !fields.is_empty() {
            client.update_issue(&issue, &fields).await.with_context(|| {
                format!(
                    "error updating issue fields {:?} for {}",
                    self.fields_arg(),
                    self.key
                )
            })?;

            writeln!(out, "issue updated {}", issue.key)?;
        }

        Ok(())
    }

    fn sub_tasks_arg(&self) -> &str {
        self.sub_tasks.as_deref().unwrap_or_default()
    }

    fn fields_arg(&self) -> &str {
        self.fields.as_deref().unwrap_or_default()
    }
}

fn parse_arg(arg: Option<&str>) -> jisub_jira::Result<Mapping> {
    arg.map(Mapping::parse).unwrap_or_else(|| Ok(Mapping::new()))
}

fn print_issue(issue: &Issue, out: &mut impl Write) -> Result<()> {
    let status = issue.status_name().unwrap_or("unknown");
    match issue.summary() {
        Some(summary) => writeln!(out, "{} [{}] {}", issue.key, status, summary)?,
        None => writeln!(out, "{} [{}]", issue.key, status)?,
    }

    if let Some(fields) = &issue.fields {
        for subtask in &fields.subtasks {
            writeln!(out, "  {} {}", subtask.key, subtask.summary().unwrap_or(""))?;
        }
    }

    Ok(())
}
