use anyhow::Result;
use colored::*;
use taskdir_core::task_manager::TaskManager;

use crate::reporter::ConsoleReporter;

pub fn execute(manager: &TaskManager) -> Result<bool> {
    println!(
        "{} {}",
        "Installing dependencies with".bold(),
        manager.runner_config().package_manager.cyan()
    );

    let summary = manager
        .install(&mut ConsoleReporter)
        .map_err(|e| anyhow::anyhow!("Failed to install dependencies: {}", e))?;

    println!();
    if summary.installed.is_empty() && summary.failed.is_empty() {
        println!("  {}", "No dependencies declared".dimmed());
    }

    if summary.success() {
        println!(
            "{} {}",
            "✓".green().bold(),
            format!("Installed {} package(s)", summary.installed.len()).green()
        );
        return Ok(true);
    }

    println!(
        "{} {}",
        "✗".red().bold(),
        format!(
            "{} package(s) failed, {} config file(s) unreadable",
            summary.failed.len(),
            summary.config_failures.len()
        )
        .red()
    );
    Ok(false)
}
