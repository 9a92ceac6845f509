//! `--config "section.key value"`

use anyhow::Result;
use std::io::Write;

use crate::config::ConfigManager;

#[derive(Debug, Clone)]
pub struct ConfigCommand {
    pub assignment: String,
}

impl ConfigCommand {
    pub fn run(&self, manager: &ConfigManager, out: &mut impl Write) -> Result<()> {
        let name = manager.update(&self.assignment)?;
        writeln!(out, "config updated: {}", name)?;
        Ok(())
    }
}
