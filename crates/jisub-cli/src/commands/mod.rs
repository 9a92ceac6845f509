pub mod config;
pub mod issue;

pub use config::ConfigCommand;
pub use issue::IssueCommand;
