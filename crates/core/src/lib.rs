//! taskdir Core Library
//!
//! This is the core library for the taskdir task runner. Tasks are directories:
//! every immediate subdirectory of the task root is a task (group), and the files
//! inside it are its members. Running a task launches its scripts and binaries one
//! after another and keeps going when one of them fails.
//!
//! ## Architecture
//!
//! - [`task_manager`] - High-level interface used by the CLI
//! - [`catalog`] - Directory scanning and extension-based classification
//! - [`execution`] - Process launching, the task runner and dependency installation
//! - [`events`] - Structured progress events and reporter sinks
//! - [`configs`] - Runner configuration and dependency manifests
//! - [`results`] - Result types for task manager operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
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
//! let outcome = manager.run_task("deploy", &mut SilentReporter);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod configs;
pub mod events;
pub mod execution;
pub mod results;
pub mod task_manager;
pub mod types;

// Re-export the main types for easier usage
pub use catalog::{CatalogEntry, EntryKind, Scanner};
pub use events::{Reporter, RunEvent};
pub use task_manager::{TaskManager, TaskManagerConfig};
pub use types::{TaskdirError, TaskdirResult};
