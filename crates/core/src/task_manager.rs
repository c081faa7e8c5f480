//! High-level task management interface
//!
//! This module provides the [`TaskManager`] which serves as the primary interface
//! for all runner operations. It owns the task root and the runner configuration,
//! both fixed at construction, and performs a fresh scan on every call.
//!
//! ## Example
//!
//! ```rust,no_run
//! use taskdir_core::events::SilentReporter;
//! use taskdir_core::task_manager::{TaskManager, TaskManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> taskdir_core::types::TaskdirResult<()> {
//! let manager = TaskManager::new(TaskManagerConfig {
//!     root: PathBuf::from("."),
//!     tasks_dir: None,
//! })?;
//!
//! // List all tasks
//! let groups = manager.list()?;
//!
//! // Run two tasks, one after the other
//! let summary = manager.run(&["build".to_string(), "test".to_string()], &mut SilentReporter);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::catalog::{CatalogEntry, Scanner};
use crate::configs::RunnerConfig;
use crate::events::Reporter;
use crate::execution::{
    aggregate_dependencies, install_dependencies, CommandExecutor, ProcessLauncher,
    SystemLauncher, TaskRunner,
};
use crate::results::{
    DependencyScan, GroupListing, InstallSummary, RunSummary, TaskOutcome, TaskPlan,
};
use crate::types::TaskdirResult;

/// Configuration for initializing a task manager
#[derive(Debug, Clone)]
pub struct TaskManagerConfig {
    pub root: PathBuf,
    /// Overrides `tasksDir` from the runner config file
    pub tasks_dir: Option<String>,
}

/// High-level entry point for listing, running and installing
pub struct TaskManager {
    root: PathBuf,
    config: RunnerConfig,
    scanner: Scanner,
    launcher: Box<dyn ProcessLauncher>,
}

impl TaskManager {
    /// Initialize a task manager that launches real processes
    pub fn new(config: TaskManagerConfig) -> TaskdirResult<Self> {
        Self::with_launcher(config, Box::new(SystemLauncher))
    }

    /// Initialize a task manager with a custom process launcher
    pub fn with_launcher(
        config: TaskManagerConfig,
        launcher: Box<dyn ProcessLauncher>,
    ) -> TaskdirResult<Self> {
        let root = if config.root.exists() {
            std::fs::canonicalize(&config.root)?
        } else {
            config.root
        };

        let mut runner_config = RunnerConfig::load(&root)?;
        if let Some(tasks_dir) = config.tasks_dir {
            runner_config.tasks_dir = tasks_dir;
        }

        let scanner = Scanner::new(root.join(&runner_config.tasks_dir), &runner_config);
        log::debug!("Task root is {}", scanner.tasks_root().display());

        Ok(Self {
            root,
            config: runner_config,
            scanner,
            launcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_root(&self) -> &Path {
        self.scanner.tasks_root()
    }

    pub fn runner_config(&self) -> &RunnerConfig {
        &self.config
    }

    /// All tasks (groups) in catalog order
    pub fn list(&self) -> TaskdirResult<Vec<CatalogEntry>> {
        self.scanner.list_groups()
    }

    /// All tasks together with their classified members; unreadable tasks carry their error
    pub fn list_with_members(&self) -> TaskdirResult<Vec<GroupListing>> {
        self.scanner.list_groups_with_members()
    }

    /// Members of one task; empty when the task does not exist
    pub fn members(&self, task: &str) -> TaskdirResult<Vec<CatalogEntry>> {
        self.scanner.list_group_members(task)
    }

    /// Dry run of a single task
    pub fn plan(&self, task: &str) -> TaskdirResult<Option<TaskPlan>> {
        self.task_runner().plan(task)
    }

    /// Run a single task
    pub fn run_task(&self, task: &str, reporter: &mut dyn Reporter) -> TaskOutcome {
        self.task_runner().run_task(task, reporter)
    }

    /// Run several tasks in the given order
    pub fn run(&self, tasks: &[String], reporter: &mut dyn Reporter) -> RunSummary {
        self.task_runner().run_tasks(tasks, reporter)
    }

    /// Run every task in catalog order
    pub fn run_all(&self, reporter: &mut dyn Reporter) -> TaskdirResult<RunSummary> {
        let tasks = self
            .list()?
            .into_iter()
            .map(|group| group.relative_path)
            .collect::<Vec<_>>();
        Ok(self.run(&tasks, reporter))
    }

    /// Aggregate dependencies declared by every config entry
    pub fn dependencies(&self, reporter: &mut dyn Reporter) -> TaskdirResult<DependencyScan> {
        aggregate_dependencies(&self.scanner, reporter)
    }

    /// Aggregate and install dependencies
    pub fn install(&self, reporter: &mut dyn Reporter) -> TaskdirResult<InstallSummary> {
        let scan = self.dependencies(reporter)?;
        let (installed, failed) =
            install_dependencies(&self.executor(), &self.config, &scan.dependencies, reporter);

        Ok(InstallSummary {
            installed,
            failed,
            config_failures: scan.failures,
        })
    }

    fn executor(&self) -> CommandExecutor<'_> {
        CommandExecutor::new(self.launcher.as_ref(), &self.root)
    }

    fn task_runner(&self) -> TaskRunner<'_> {
        TaskRunner::new(&self.scanner, &self.config, self.executor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{RecordingReporter, RunEvent};
    use crate::execution::{Invocation, ProcessOutput};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedLauncher {
        calls: Rc<RefCell<Vec<Invocation>>>,
    }

    impl ProcessLauncher for SharedLauncher {
        fn launch(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput> {
            self.calls.borrow_mut().push(invocation.clone());
            Ok(ProcessOutput {
                success: true,
                code: Some(0),
                ..ProcessOutput::default()
            })
        }
    }

    fn manager_for(root: &Path, launcher: &SharedLauncher) -> TaskManager {
        TaskManager::with_launcher(
            TaskManagerConfig {
                root: root.to_path_buf(),
                tasks_dir: None,
            },
            Box::new(launcher.clone()),
        )
        .unwrap()
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_root_lists_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = manager_for(temp_dir.path(), &SharedLauncher::default());

        assert!(manager.list().unwrap().is_empty());
        assert!(manager.list_with_members().unwrap().is_empty());
        let summary = manager.run_all(&mut RecordingReporter::default()).unwrap();
        assert!(summary.outcomes.is_empty());
        assert!(summary.success());
    }

    #[test]
    fn test_run_all_visits_groups_in_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "tasks/b/two.sh", "");
        write(root, "tasks/a/one.sh", "");
        let launcher = SharedLauncher::default();
        let manager = manager_for(root, &launcher);

        let summary = manager.run_all(&mut RecordingReporter::default()).unwrap();

        let tasks: Vec<_> = summary.outcomes.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tasks, vec!["a", "b"]);
        let calls = launcher.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].current_dir.as_deref(), Some(manager.root()));
    }

    #[test]
    fn test_tasks_dir_from_config_file_and_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, ".taskdir/config.yml", "tasksDir: jobs\n");
        write(root, "jobs/nightly/run", "");
        write(root, "other/weekly/run", "");

        let manager = manager_for(root, &SharedLauncher::default());
        let names: Vec<_> = manager
            .list()
            .unwrap()
            .into_iter()
            .map(|g| g.relative_path)
            .collect();
        assert_eq!(names, vec!["nightly"]);

        let overridden = TaskManager::with_launcher(
            TaskManagerConfig {
                root: root.to_path_buf(),
                tasks_dir: Some("other".to_string()),
            },
            Box::new(SharedLauncher::default()),
        )
        .unwrap();
        assert_eq!(overridden.list().unwrap()[0].relative_path, "weekly");
    }

    #[test]
    fn test_install_reports_config_failures_and_installs_rest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "tasks/a/config.json", "[");
        write(
            root,
            "tasks/b/config.json",
            r#"{"dependencies":{"x":"1.0.0"},"devDependencies":{"y":"2.0.0"}}"#,
        );
        let launcher = SharedLauncher::default();
        let manager = manager_for(root, &launcher);
        let mut reporter = RecordingReporter::default();

        let summary = manager.install(&mut reporter).unwrap();

        assert_eq!(summary.installed, vec!["x", "y"]);
        assert_eq!(summary.config_failures.len(), 1);
        assert!(!summary.success());
        assert_eq!(launcher.calls.borrow().len(), 2);
        assert!(matches!(reporter.events[0], RunEvent::ConfigFailed { .. }));
    }

    #[test]
    fn test_list_with_members_counts_kinds() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "tasks/deploy/a.js", "");
        write(root, "tasks/deploy/run", "");
        write(root, "tasks/deploy/config.json", "{}");

        let manager = manager_for(root, &SharedLauncher::default());
        let listing = manager.list_with_members().unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].count_of(crate::catalog::EntryKind::Script), 1);
        assert_eq!(listing[0].count_of(crate::catalog::EntryKind::Binary), 1);
        assert_eq!(listing[0].count_of(crate::catalog::EntryKind::Config), 1);
        assert_eq!(manager.members("deploy").unwrap().len(), 3);
        assert!(manager.members("missing").unwrap().is_empty());
    }
}
