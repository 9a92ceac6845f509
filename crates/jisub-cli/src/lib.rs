//! jisub command line
//!
//! Command dispatch exposed as a library for testing.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::Args;
pub use commands::{ConfigCommand, IssueCommand};
pub use config::ConfigManager;

use anyhow::{Context, Result};
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Log filter built from `--log-level`, e.g. `debug` or `jisub_jira=trace`.
/// `RUST_LOG` is not consulted.
pub fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::new(log_level)
}

/// Run one invocation. Command output goes to `out`; errors are returned
/// to the caller for reporting.
pub async fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let manager = ConfigManager::new(args.config_dir)?;

    if let Some(assignment) = args.config {
        return ConfigCommand { assignment }.run(&manager, out);
    }

    let key = args
        .issue
        .filter(|key| !key.trim().is_empty())
        .context("missing required issue key")?;

    let client = manager.client()?;
    tracing::debug!(base_url = client.base_url(), "jira client ready");

    IssueCommand {
        key,
        sub_tasks: args.sub_tasks,
        fields: args.fields,
    }
    .run(&client, out)
    .await
}
