pub mod config;

pub use config::ConfigStorage;

use std::path::PathBuf;

use crate::{Error, Result};

pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("jisub"))
        .ok_or_else(|| Error::Validation("Could not find config directory".to_string()))
}
