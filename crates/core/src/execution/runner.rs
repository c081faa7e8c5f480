//! High-level task runner
//!
//! Resolves a task name to a group and launches the group's executable members
//! one after another. A failing member is recorded and reported, and the loop
//! moves on to the next member; a missing task in a batch does not stop the
//! tasks after it.

use crate::catalog::{CatalogEntry, EntryKind, Scanner};
use crate::configs::RunnerConfig;
use crate::events::{Reporter, RunEvent};
use crate::execution::command::CommandExecutor;
use crate::results::{
    FailureReason, ItemFailure, PlannedAction, PlannedItem, RunSummary, TaskOutcome, TaskPlan,
    TaskReport,
};
use crate::types::TaskdirResult;

/// Runs groups of the task tree through a [`CommandExecutor`]
pub struct TaskRunner<'a> {
    scanner: &'a Scanner,
    config: &'a RunnerConfig,
    executor: CommandExecutor<'a>,
}

impl<'a> TaskRunner<'a> {
    pub fn new(
        scanner: &'a Scanner,
        config: &'a RunnerConfig,
        executor: CommandExecutor<'a>,
    ) -> Self {
        Self {
            scanner,
            config,
            executor,
        }
    }

    /// Describe what running `task` would launch. `None` when the task does not exist.
    pub fn plan(&self, task: &str) -> TaskdirResult<Option<TaskPlan>> {
        let Some(group) = self.scanner.find_group(task)? else {
            return Ok(None);
        };

        let items = self
            .scanner
            .members_of(&group)?
            .into_iter()
            .map(|entry| PlannedItem {
                action: self.action_for(entry.kind),
                entry,
            })
            .collect();

        Ok(Some(TaskPlan {
            task: group.relative_path,
            items,
        }))
    }

    /// Run every name in order, each independently of the others
    pub fn run_tasks(&self, tasks: &[String], reporter: &mut dyn Reporter) -> RunSummary {
        let outcomes = tasks
            .iter()
            .map(|task| (task.clone(), self.run_task(task, reporter)))
            .collect();
        RunSummary { outcomes }
    }

    /// Resolve `task` against the group catalog and run its executable members
    pub fn run_task(&self, task: &str, reporter: &mut dyn Reporter) -> TaskOutcome {
        let members = match self.resolve(task) {
            Ok(Some(members)) => members,
            Ok(None) => {
                log::info!("Task '{}' not found", task);
                reporter.report(RunEvent::TaskNotFound {
                    task: task.to_string(),
                });
                return TaskOutcome::NotFound;
            }
            Err(e) => {
                log::warn!("Could not scan task '{}': {}", task, e);
                reporter.report(RunEvent::TaskErrored {
                    task: task.to_string(),
                    message: e.to_string(),
                });
                return TaskOutcome::Errored(e.to_string());
            }
        };

        reporter.report(RunEvent::TaskStarted {
            task: task.to_string(),
            members: members.len(),
        });

        let mut report = TaskReport {
            task: task.to_string(),
            ..TaskReport::default()
        };

        for member in &members {
            self.run_member(task, member, &mut report, reporter);
        }

        reporter.report(RunEvent::TaskFinished {
            task: task.to_string(),
            executed: report.executed.len(),
            failed: report.failures.len(),
        });

        TaskOutcome::Completed(report)
    }

    fn resolve(&self, task: &str) -> TaskdirResult<Option<Vec<CatalogEntry>>> {
        match self.scanner.find_group(task)? {
            Some(group) => Ok(Some(self.scanner.members_of(&group)?)),
            None => Ok(None),
        }
    }

    fn run_member(
        &self,
        task: &str,
        member: &CatalogEntry,
        report: &mut TaskReport,
        reporter: &mut dyn Reporter,
    ) {
        let item = member.relative_path.clone();
        let action = self.action_for(member.kind);

        if action == PlannedAction::Skip {
            reporter.report(RunEvent::ItemSkipped {
                task: task.to_string(),
                item: item.clone(),
                kind: member.kind,
            });
            report.skipped.push(item);
            return;
        }

        reporter.report(RunEvent::ItemStarted {
            task: task.to_string(),
            item: item.clone(),
            kind: member.kind,
        });

        let result = match action {
            PlannedAction::Interpret { interpreter } => {
                self.executor
                    .execute_script(&interpreter, &member.absolute_path, task, &item)
            }
            _ => self
                .executor
                .execute_binary(&member.absolute_path, task, &item),
        };
        report.executed.push(item.clone());

        let failure = match result {
            Ok(output) => {
                if !output.stdout.trim().is_empty() {
                    reporter.report(RunEvent::ItemOutput {
                        task: task.to_string(),
                        item: item.clone(),
                        output: output.stdout,
                    });
                }
                if output.success {
                    None
                } else {
                    Some((FailureReason::Exit(output.code), output.stderr))
                }
            }
            Err(reason) => Some((reason, String::new())),
        };

        match failure {
            None => reporter.report(RunEvent::ItemSucceeded {
                task: task.to_string(),
                item,
            }),
            Some((reason, stderr)) => {
                let message = if stderr.trim().is_empty() {
                    reason.to_string()
                } else {
                    format!("{}: {}", reason, stderr.trim())
                };
                log::info!("Item '{}' failed: {}", item, message);
                reporter.report(RunEvent::ItemFailed {
                    task: task.to_string(),
                    item: item.clone(),
                    message,
                });
                report.failures.push(ItemFailure { item, reason });
            }
        }
    }

    fn action_for(&self, kind: EntryKind) -> PlannedAction {
        match kind {
            EntryKind::Script => PlannedAction::Interpret {
                interpreter: self.config.interpreter.clone(),
            },
            EntryKind::Binary => PlannedAction::Direct,
            EntryKind::Group | EntryKind::Config | EntryKind::Other => PlannedAction::Skip,
        }
    }
}
