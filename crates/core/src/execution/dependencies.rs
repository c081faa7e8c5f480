//! Dependency aggregation and installation
//!
//! Every config entry contributes its `dependencies` and `devDependencies`.
//! Entries are read in catalog order (groups sorted, then files sorted), and a
//! package declared twice keeps the version from the entry read last.

use std::path::PathBuf;

use crate::catalog::{CatalogEntry, Scanner};
use crate::configs::{parse_package_manifest, RunnerConfig};
use crate::events::{Reporter, RunEvent};
use crate::execution::command::CommandExecutor;
use crate::results::{ConfigFailure, DependencyMap, DependencyScan, FailureReason};
use crate::types::TaskdirResult;

/// Merge the declared dependencies of every config entry
pub fn aggregate_dependencies(
    scanner: &Scanner,
    reporter: &mut dyn Reporter,
) -> TaskdirResult<DependencyScan> {
    let groups = scanner.list_groups()?;
    Ok(aggregate_groups(scanner, groups, reporter))
}

/// A group that cannot be read is reported like an unreadable config entry
/// and the remaining groups are still aggregated.
fn aggregate_groups(
    scanner: &Scanner,
    groups: Vec<CatalogEntry>,
    reporter: &mut dyn Reporter,
) -> DependencyScan {
    let mut scan = DependencyScan::default();

    for group in groups {
        let entries = match scanner.config_members_of(&group) {
            Ok(entries) => entries,
            Err(e) => {
                let message = format!("Failed to read group {}: {}", group.relative_path, e);
                record_failure(&mut scan, reporter, group.absolute_path, message);
                continue;
            }
        };

        for entry in entries {
            let parsed = std::fs::read_to_string(&entry.absolute_path)
                .map_err(|e| format!("Failed to read {}: {}", entry.relative_path, e))
                .and_then(|content| {
                    parse_package_manifest(&content)
                        .map_err(|e| format!("Failed to parse {}: {}", entry.relative_path, e))
                });

            match parsed {
                Ok(manifest) => {
                    log::debug!(
                        "{} declares {} dependencies and {} dev dependencies",
                        entry.relative_path,
                        manifest.dependencies.len(),
                        manifest.dev_dependencies.len()
                    );
                    scan.dependencies.extend(manifest.dependencies);
                    scan.dependencies.extend(manifest.dev_dependencies);
                }
                Err(message) => record_failure(&mut scan, reporter, entry.absolute_path, message),
            }
        }
    }

    scan
}

fn record_failure(
    scan: &mut DependencyScan,
    reporter: &mut dyn Reporter,
    path: PathBuf,
    message: String,
) {
    log::warn!("{}", message);
    reporter.report(RunEvent::ConfigFailed {
        path: path.clone(),
        message: message.clone(),
    });
    scan.failures.push(ConfigFailure { path, message });
}

/// Install each dependency with the configured package manager, continuing past failures.
///
/// Returns the packages installed and the packages that failed with their messages.
pub fn install_dependencies(
    executor: &CommandExecutor,
    config: &RunnerConfig,
    dependencies: &DependencyMap,
    reporter: &mut dyn Reporter,
) -> (Vec<String>, Vec<(String, String)>) {
    let mut installed = Vec::new();
    let mut failed = Vec::new();

    for (package, version) in dependencies {
        reporter.report(RunEvent::InstallStarted {
            package: package.clone(),
            version: version.clone(),
        });

        let result = executor
            .execute_install(
                &config.package_manager,
                package,
                version,
                config.save_flag.as_deref(),
            )
            .map_err(|reason| (reason, String::new()))
            .and_then(|output| {
                if output.success {
                    Ok(())
                } else {
                    Err((FailureReason::Exit(output.code), output.stderr))
                }
            });

        match result {
            Ok(()) => {
                reporter.report(RunEvent::InstallSucceeded {
                    package: package.clone(),
                });
                installed.push(package.clone());
            }
            Err((reason, stderr)) => {
                let message = if stderr.trim().is_empty() {
                    reason.to_string()
                } else {
                    format!("{}: {}", reason, stderr.trim())
                };
                log::warn!("Installing {}@{} {}", package, version, message);
                reporter.report(RunEvent::InstallFailed {
                    package: package.clone(),
                    message: message.clone(),
                });
                failed.push((package.clone(), message));
            }
        }
    }

    (installed, failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntryKind;
    use crate::events::RecordingReporter;
    use crate::execution::command::{Invocation, ProcessLauncher, ProcessOutput};
    use std::cell::RefCell;
    use std::path::Path;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn scanner_for(root: &Path) -> Scanner {
        Scanner::new(root.to_path_buf(), &RunnerConfig::default())
    }

    #[test]
    fn test_later_group_wins_on_collision() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        // groupB sorts after groupA, so its version is applied last
        write(root, "groupB/config.json", r#"{"dependencies":{"x":"2.0.0"}}"#);
        write(root, "groupA/config.json", r#"{"dependencies":{"x":"1.0.0"}}"#);

        let scan = aggregate_dependencies(&scanner_for(root), &mut RecordingReporter::default())
            .unwrap();

        assert_eq!(scan.dependencies.get("x").map(String::as_str), Some("2.0.0"));
        assert!(scan.failures.is_empty());
    }

    #[test]
    fn test_dev_dependencies_merged_into_same_map() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "build/config.json",
            r#"{"dependencies":{"a":"1"},"devDependencies":{"b":"2","a":"3"}}"#,
        );

        let scan = aggregate_dependencies(&scanner_for(root), &mut RecordingReporter::default())
            .unwrap();

        assert_eq!(scan.dependencies.len(), 2);
        assert_eq!(scan.dependencies["a"], "3");
        assert_eq!(scan.dependencies["b"], "2");
    }

    #[test]
    fn test_malformed_entry_reported_and_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "a/config.json", "{ not json");
        write(root, "b/config.json", r#"{"dependencies":{"y":"1.2.3"}}"#);
        let mut reporter = RecordingReporter::default();

        let scan = aggregate_dependencies(&scanner_for(root), &mut reporter).unwrap();

        assert_eq!(scan.dependencies.get("y").map(String::as_str), Some("1.2.3"));
        assert_eq!(scan.failures.len(), 1);
        assert_eq!(scan.failures[0].path, root.join("a").join("config.json"));
        assert!(matches!(
            &reporter.events[0],
            RunEvent::ConfigFailed { message, .. } if message.contains("a/config.json")
        ));
    }

    #[test]
    fn test_no_config_entries_yields_empty_map() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "build/run.sh", "");

        let scan = aggregate_dependencies(
            &scanner_for(temp_dir.path()),
            &mut RecordingReporter::default(),
        )
        .unwrap();

        assert!(scan.dependencies.is_empty());
    }

    #[test]
    fn test_unreadable_group_reported_and_rest_aggregated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "a/config.json", r#"{"dependencies":{"x":"1.0.0"}}"#);
        write(root, "c/config.json", r#"{"dependencies":{"z":"3.0.0"}}"#);
        let scanner = scanner_for(root);
        let mut groups = scanner.list_groups().unwrap();
        // Listed but gone by the time its members are read
        groups.insert(
            1,
            CatalogEntry {
                relative_path: "b".to_string(),
                absolute_path: root.join("b"),
                kind: EntryKind::Group,
            },
        );
        let mut reporter = RecordingReporter::default();

        let scan = aggregate_groups(&scanner, groups, &mut reporter);

        assert_eq!(scan.dependencies.len(), 2);
        assert_eq!(scan.dependencies["x"], "1.0.0");
        assert_eq!(scan.dependencies["z"], "3.0.0");
        assert_eq!(scan.failures.len(), 1);
        assert_eq!(scan.failures[0].path, root.join("b"));
        assert!(matches!(
            &reporter.events[..],
            [RunEvent::ConfigFailed { path, .. }] if path == &root.join("b")
        ));
    }

    struct FailingFor {
        package: &'static str,
        calls: RefCell<Vec<Invocation>>,
    }

    impl ProcessLauncher for FailingFor {
        fn launch(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput> {
            self.calls.borrow_mut().push(invocation.clone());
            let spec = invocation.args[1].to_string_lossy().into_owned();
            let success = !spec.starts_with(self.package);
            Ok(ProcessOutput {
                success,
                code: Some(if success { 0 } else { 1 }),
                stderr: if success {
                    String::new()
                } else {
                    "E404 not found\n".to_string()
                },
                ..ProcessOutput::default()
            })
        }
    }

    #[test]
    fn test_install_continues_after_failure() {
        let launcher = FailingFor {
            package: "b@",
            calls: RefCell::new(Vec::new()),
        };
        let root = PathBuf::from("/work");
        let executor = CommandExecutor::new(&launcher, &root);
        let config = RunnerConfig {
            save_flag: Some("--save".to_string()),
            ..RunnerConfig::default()
        };
        let dependencies = DependencyMap::from([
            ("a".to_string(), "1.0.0".to_string()),
            ("b".to_string(), "2.0.0".to_string()),
            ("c".to_string(), "3.0.0".to_string()),
        ]);
        let mut reporter = RecordingReporter::default();

        let (installed, failed) =
            install_dependencies(&executor, &config, &dependencies, &mut reporter);

        assert_eq!(installed, vec!["a", "c"]);
        assert_eq!(
            failed,
            vec![(
                "b".to_string(),
                "exited with code 1: E404 not found".to_string()
            )]
        );
        let calls = launcher.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].program, PathBuf::from("npm"));
        assert_eq!(calls[2].args[2].to_string_lossy(), "--save");
    }
}
