use anyhow::Result;
use colored::*;
use taskdir_core::task_manager::TaskManager;

use crate::palette::{get_task_color, kind_color};

pub fn execute(manager: &TaskManager, members: bool) -> Result<bool> {
    println!("{}", "Tasks".bold().underline());

    if members {
        list_with_members(manager)
    } else {
        list_names(manager)
    }
}

fn list_names(manager: &TaskManager) -> Result<bool> {
    let groups = manager
        .list()
        .map_err(|e| anyhow::anyhow!("Failed to list tasks: {}", e))?;

    if groups.is_empty() {
        print_empty(manager);
        return Ok(true);
    }

    for group in &groups {
        let name = &group.relative_path;
        println!("{}", name.color(get_task_color(name)).bold());
    }

    Ok(true)
}

fn list_with_members(manager: &TaskManager) -> Result<bool> {
    let listings = manager
        .list_with_members()
        .map_err(|e| anyhow::anyhow!("Failed to list tasks: {}", e))?;

    if listings.is_empty() {
        print_empty(manager);
        return Ok(true);
    }

    let mut all_readable = true;
    for listing in &listings {
        let name = &listing.group.relative_path;

        if let Some(error) = &listing.error {
            all_readable = false;
            println!(
                "{} {}",
                name.color(get_task_color(name)).bold(),
                format!("(unreadable: {})", error).red()
            );
            continue;
        }

        let runnable = listing.members.iter().filter(|m| m.kind.is_executable()).count();
        println!(
            "{} {}",
            name.color(get_task_color(name)).bold(),
            format!("({} runnable)", runnable).dimmed()
        );

        for member in &listing.members {
            println!(
                "  {} {}",
                member.name(),
                format!("[{}]", member.kind).color(kind_color(member.kind))
            );
        }
    }

    Ok(all_readable)
}

fn print_empty(manager: &TaskManager) {
    println!("  {}", "No tasks found".dimmed());
    println!(
        "  {}",
        format!("(looked in {})", manager.tasks_root().display()).dimmed()
    );
}
