//! Init-config command implementation - write the default configuration

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::error::CliError;

pub fn execute(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::validation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    Config::default().save_to_file(path)?;
    log::info!("Wrote default configuration to {}", path.display());
    Ok(())
}
