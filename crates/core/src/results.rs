//! Result types for task manager operations
//!
//! Every operation keeps going past local failures, so these types carry the
//! failures alongside what succeeded instead of short-circuiting with an error.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::{CatalogEntry, EntryKind};

/// Aggregated package name to version specifier
pub type DependencyMap = BTreeMap<String, String>;

/// Why a member did not complete successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The process could not be started
    Launch(String),
    /// The process ran and exited unsuccessfully. `None` when killed by a signal.
    Exit(Option<i32>),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Launch(message) => write!(f, "failed to launch: {}", message),
            FailureReason::Exit(Some(code)) => write!(f, "exited with code {}", code),
            FailureReason::Exit(None) => write!(f, "terminated by signal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub item: String,
    pub reason: FailureReason,
}

/// What happened to each member of one group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskReport {
    pub task: String,
    /// Members launched, in launch order
    pub executed: Vec<String>,
    /// Config and other members that were never launched
    pub skipped: Vec<String>,
    pub failures: Vec<ItemFailure>,
}

impl TaskReport {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    NotFound,
    Completed(TaskReport),
    /// The task root could not be scanned
    Errored(String),
}

impl TaskOutcome {
    pub fn success(&self) -> bool {
        matches!(self, TaskOutcome::Completed(report) if report.success())
    }
}

/// Outcome of every task requested in one batch, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<(String, TaskOutcome)>,
}

impl RunSummary {
    pub fn not_found(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, TaskOutcome::NotFound))
            .map(|(task, _)| task.as_str())
            .collect()
    }

    pub fn failed_items(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, outcome)| match outcome {
                TaskOutcome::Completed(report) => report.failures.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.success())
    }
}

/// A config entry that could not be read or parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Result of aggregating dependencies across config entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyScan {
    pub dependencies: DependencyMap,
    pub failures: Vec<ConfigFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub installed: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub config_failures: Vec<ConfigFailure>,
}

impl InstallSummary {
    pub fn success(&self) -> bool {
        self.failed.is_empty() && self.config_failures.is_empty()
    }
}

/// How a member would be launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Interpret { interpreter: String },
    Direct,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub entry: CatalogEntry,
    pub action: PlannedAction,
}

/// Dry-run view of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPlan {
    pub task: String,
    pub items: Vec<PlannedItem>,
}

impl TaskPlan {
    pub fn executable(&self) -> impl Iterator<Item = &PlannedItem> {
        self.items
            .iter()
            .filter(|item| item.action != PlannedAction::Skip)
    }
}

/// A group together with its classified members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListing {
    pub group: CatalogEntry,
    pub members: Vec<CatalogEntry>,
    /// Set when the group directory could not be read; `members` is then empty
    pub error: Option<String>,
}

impl GroupListing {
    pub fn count_of(&self, kind: EntryKind) -> usize {
        self.members.iter().filter(|m| m.kind == kind).count()
    }
}
