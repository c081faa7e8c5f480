use anyhow::Result;
use colored::*;
use taskdir_core::results::PlannedAction;
use taskdir_core::task_manager::TaskManager;

pub fn execute(manager: &TaskManager, task: &str) -> Result<bool> {
    println!("{} {}", "Execution plan for".bold(), task.cyan());

    let plan = manager
        .plan(task)
        .map_err(|e| anyhow::anyhow!("Failed to get execution plan: {}", e))?;

    let Some(plan) = plan else {
        eprintln!(
            "{} Task '{}' not found. Use 'taskdir list' to see available tasks.",
            "✗".red().bold(),
            task
        );
        return Ok(false);
    };

    println!("\n{}:", "Execution order".bold());
    for (i, item) in plan.executable().enumerate() {
        let how = match &item.action {
            PlannedAction::Interpret { interpreter } => {
                format!("{} {}", interpreter, item.entry.absolute_path.display())
            }
            _ => item.entry.absolute_path.display().to_string(),
        };
        println!("  {}. {} {}", i + 1, item.entry.relative_path, how.dimmed());
    }

    let skipped: Vec<_> = plan
        .items
        .iter()
        .filter(|item| item.action == PlannedAction::Skip)
        .map(|item| item.entry.relative_path.as_str())
        .collect();
    if !skipped.is_empty() {
        println!("\n{} {}", "Skipped:".bold(), skipped.join(", ").dimmed());
    }

    Ok(true)
}
