use anyhow::{Context, Result};
use taskdir_core::configs::runner_config_schema;

pub fn execute() -> Result<bool> {
    let schema = serde_json::to_string_pretty(&runner_config_schema())
        .context("Failed to serialize config schema")?;
    println!("{}", schema);
    Ok(true)
}
