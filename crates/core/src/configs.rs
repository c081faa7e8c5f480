//! Configuration parsing for the runner and for group dependency manifests

pub mod package;
pub mod runner;

pub use package::{parse_package_manifest, PackageManifest};
pub use runner::{parse_runner_config, runner_config_schema, RunnerConfig, RUNNER_CONFIG_PATH};
