//! jisub
//!
//! Create sub-tasks under a JIRA issue and update its fields.

use clap::Parser;
use jisub_cli::Args;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(jisub_cli::log_filter(&args.log_level))
        .init();

    let mut stdout = std::io::stdout().lock();
    match jisub_cli::run(args, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
