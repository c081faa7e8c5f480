use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{TaskdirError, TaskdirResult};

/// Location of the optional runner config, relative to the root
pub const RUNNER_CONFIG_PATH: &str = ".taskdir/config.yml";

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RunnerConfig {
    /// Directory below the root that holds the task groups.
    #[serde(default = "default_tasks_dir")]
    pub tasks_dir: String,
    /// Extensions run through the interpreter.
    #[serde(default = "default_script_extensions")]
    pub script_extensions: Vec<String>,
    /// Extensions executed directly. The empty string matches files without an extension.
    #[serde(default = "default_binary_extensions")]
    pub binary_extensions: Vec<String>,
    /// Extensions of dependency manifests.
    #[serde(default = "default_config_extensions")]
    pub config_extensions: Vec<String>,
    /// Program used to run scripts.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Program used to install aggregated dependencies.
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
    /// Extra flag passed to every install command, e.g. `--save`.
    #[serde(default)]
    pub save_flag: Option<String>,
    /// Glob patterns for group or member paths to leave out of every listing.
    #[serde(default)]
    pub excludes: Vec<String>,
}

fn default_tasks_dir() -> String {
    "tasks".to_string()
}

fn default_script_extensions() -> Vec<String> {
    vec!["js".to_string()]
}

fn default_binary_extensions() -> Vec<String> {
    ["", "sh", "bat", "exe"].iter().map(|s| s.to_string()).collect()
}

fn default_config_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_interpreter() -> String {
    "node".to_string()
}

fn default_package_manager() -> String {
    "npm".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tasks_dir: default_tasks_dir(),
            script_extensions: default_script_extensions(),
            binary_extensions: default_binary_extensions(),
            config_extensions: default_config_extensions(),
            interpreter: default_interpreter(),
            package_manager: default_package_manager(),
            save_flag: None,
            excludes: Vec::new(),
        }
    }
}

impl RunnerConfig {
    /// Load `.taskdir/config.yml` below `root`, falling back to defaults when it is absent
    pub fn load(root: &Path) -> TaskdirResult<Self> {
        let config_path = root.join(RUNNER_CONFIG_PATH);
        if !config_path.is_file() {
            log::debug!(
                "No runner config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            TaskdirError::Config(format!(
                "Failed to read runner config {}: {}",
                config_path.display(),
                e
            ))
        })?;

        parse_runner_config(&content).map_err(|e| {
            TaskdirError::Config(format!(
                "Failed to parse runner config {}: {}",
                config_path.display(),
                e
            ))
        })
    }
}

/// JSON schema of the runner config file
pub fn runner_config_schema() -> serde_json::Value {
    schemars::schema_for!(RunnerConfig).to_value()
}

pub fn parse_runner_config(yaml_str: &str) -> TaskdirResult<RunnerConfig> {
    let config: RunnerConfig = serde_yaml::from_str(yaml_str)?;
    if config.tasks_dir.trim().is_empty() {
        return Err(TaskdirError::Config("tasksDir must not be empty".to_string()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_conventions() {
        let config = RunnerConfig::default();
        assert_eq!(config.tasks_dir, "tasks");
        assert_eq!(config.script_extensions, vec!["js"]);
        assert_eq!(config.binary_extensions, vec!["", "sh", "bat", "exe"]);
        assert_eq!(config.config_extensions, vec!["json"]);
        assert_eq!(config.interpreter, "node");
        assert_eq!(config.package_manager, "npm");
        assert!(config.save_flag.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = parse_runner_config("tasksDir: jobs\ninterpreter: deno\n").unwrap();
        assert_eq!(config.tasks_dir, "jobs");
        assert_eq!(config.interpreter, "deno");
        assert_eq!(config.binary_extensions, vec!["", "sh", "bat", "exe"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_runner_config("taskDirectory: jobs\n").unwrap_err();
        assert!(matches!(err, TaskdirError::Yaml(_)));
    }

    #[test]
    fn test_empty_tasks_dir_rejected() {
        let err = parse_runner_config("tasksDir: \"\"\n").unwrap_err();
        assert!(matches!(err, TaskdirError::Config(_)));
    }

    #[test]
    fn test_schema_uses_camel_case_keys() {
        let schema = runner_config_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("tasksDir"));
        assert!(properties.contains_key("binaryExtensions"));
        assert!(!properties.contains_key("tasks_dir"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = RunnerConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_load_reads_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_dir = temp_dir.path().join(".taskdir");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.yml"),
            "packageManager: pnpm\nsaveFlag: --save-dev\nexcludes:\n  - \"**/*.md\"\n",
        )
        .unwrap();

        let config = RunnerConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.package_manager, "pnpm");
        assert_eq!(config.save_flag.as_deref(), Some("--save-dev"));
        assert_eq!(config.excludes, vec!["**/*.md"]);
    }
}
