//! Console rendering of run events

use colored::*;
use taskdir_core::{Reporter, RunEvent};

use crate::palette::{get_task_color, kind_color};

/// Prints every event as it arrives
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: RunEvent) {
        match event {
            RunEvent::TaskStarted { task, members } => {
                println!();
                println!(
                    "┌─ {} {}",
                    "Running task".bold(),
                    task.color(get_task_color(&task)).bold()
                );
                println!("└─ {}", format!("{} member(s)", members).bright_black());
            }
            RunEvent::TaskNotFound { task } => {
                eprintln!(
                    "{} Task '{}' not found. Use 'taskdir list' to see available tasks.",
                    "✗".red().bold(),
                    task
                );
            }
            RunEvent::TaskErrored { task, message } => {
                eprintln!("{} Task '{}': {}", "✗".red().bold(), task, message.red());
            }
            RunEvent::ItemStarted { item, kind, .. } => {
                println!(
                    "  {} {} {}",
                    "▶".blue(),
                    item,
                    format!("[{}]", kind).color(kind_color(kind))
                );
            }
            RunEvent::ItemSkipped { item, kind, .. } => {
                println!(
                    "  {} {}",
                    "-".bright_black(),
                    format!("{} ({}, skipped)", item, kind).bright_black()
                );
            }
            RunEvent::ItemOutput { output, .. } => {
                for line in output.trim_end().lines() {
                    println!("  {} {}", "│".bright_black(), line);
                }
            }
            RunEvent::ItemSucceeded { item, .. } => {
                println!("  {} {}", "✓".green().bold(), item.green());
            }
            RunEvent::ItemFailed { item, message, .. } => {
                println!("  {} {} {}", "✗".red().bold(), item.red(), message.dimmed());
            }
            RunEvent::TaskFinished {
                task,
                executed,
                failed,
            } => {
                if failed == 0 {
                    println!(
                        "{} {}",
                        "✓".green().bold(),
                        format!("{}: {} item(s) completed", task, executed).green()
                    );
                } else {
                    println!(
                        "{} {}",
                        "✗".red().bold(),
                        format!("{}: {}/{} item(s) failed", task, failed, executed).red()
                    );
                }
            }
            RunEvent::ConfigFailed { message, .. } => {
                eprintln!("{} {}", "Warning:".yellow().bold(), message.yellow());
            }
            RunEvent::InstallStarted { package, version } => {
                println!("  {} {}@{}", "↓".blue(), package.cyan(), version);
            }
            RunEvent::InstallSucceeded { package } => {
                println!("  {} {}", "✓".green().bold(), package.green());
            }
            RunEvent::InstallFailed { package, message } => {
                println!("  {} {} {}", "✗".red().bold(), package.red(), message.dimmed());
            }
        }
    }
}
