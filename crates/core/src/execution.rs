//! Task execution module
//!
//! This module handles launching group members and dependency installs,
//! including per-item failure isolation and result reporting.

pub mod command;
pub mod dependencies;
pub mod runner;

pub use command::{CommandExecutor, Invocation, ProcessLauncher, ProcessOutput, SystemLauncher};
pub use dependencies::{aggregate_dependencies, install_dependencies};
pub use runner::TaskRunner;
