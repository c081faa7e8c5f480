use anyhow::Result;
use colored::*;
use taskdir_core::task_manager::TaskManager;

use crate::reporter::ConsoleReporter;

pub fn execute(manager: &TaskManager, tasks: &[String]) -> Result<bool> {
    let mut reporter = ConsoleReporter;

    let summary = if tasks.is_empty() {
        println!("{}", "Running all tasks".bold());
        manager
            .run_all(&mut reporter)
            .map_err(|e| anyhow::anyhow!("Failed to list tasks: {}", e))?
    } else {
        println!("{} {}", "Running".bold(), tasks.join(", ").cyan());
        manager.run(tasks, &mut reporter)
    };

    println!();
    println!("{}", "─".repeat(50).dimmed());

    if summary.success() {
        println!(
            "{} {}",
            "✓".green().bold(),
            "All tasks completed successfully!".green().bold()
        );
        return Ok(true);
    }

    let not_found = summary.not_found();
    if !not_found.is_empty() {
        println!(
            "{} {}",
            "✗".red().bold(),
            format!("Not found: {}", not_found.join(", ")).red()
        );
    }
    let failed_items = summary.failed_items();
    if failed_items > 0 {
        println!(
            "{} {}",
            "✗".red().bold(),
            format!("{} item(s) failed", failed_items).red()
        );
    }

    Ok(false)
}
