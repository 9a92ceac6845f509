use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  jisub --config \"jira.url https://jira-api.com/jira/rest/api/2\"
  jisub --config \"user.token <token>\"
  jisub --sub-tasks \"QA:2 BE:3 FE:4\" --fields \"storypoints:4 dealsize:2,3,4\" JIRA-39106";

#[derive(Parser, Debug)]
#[command(name = "jisub", version)]
#[command(about = "jisub - create JIRA sub-tasks and update issue fields", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Parent issue key, e.g. JIRA-39106
    pub issue: Option<String>,

    /// Create/update configuration
    #[arg(
        short,
        long,
        value_name = "SECTION.KEY VALUE",
        conflicts_with_all = ["sub_tasks", "fields"]
    )]
    pub config: Option<String>,

    /// Sub-tasks to create for the issue, as LABEL:POINTS pairs
    #[arg(short, long = "sub-tasks", visible_alias = "st", value_name = "BREAKDOWN")]
    pub sub_tasks: Option<String>,

    /// Fields to update on the issue, as NAME:VALUE pairs
    #[arg(short, long, value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Configuration directory [default: platform config dir/jisub]
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,
}
