pub mod config;

pub use config::{Config, JiraConfig, UserConfig};
