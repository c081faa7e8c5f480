//! Structured progress events
//!
//! The engine never prints. Everything a user might want to see is delivered to
//! a [`Reporter`] and the caller decides how to render it.

use std::path::PathBuf;

use crate::catalog::EntryKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    TaskStarted {
        task: String,
        members: usize,
    },
    TaskNotFound {
        task: String,
    },
    /// Scanning the task root failed before any member could run
    TaskErrored {
        task: String,
        message: String,
    },
    ItemStarted {
        task: String,
        item: String,
        kind: EntryKind,
    },
    ItemSkipped {
        task: String,
        item: String,
        kind: EntryKind,
    },
    ItemOutput {
        task: String,
        item: String,
        output: String,
    },
    ItemSucceeded {
        task: String,
        item: String,
    },
    ItemFailed {
        task: String,
        item: String,
        message: String,
    },
    TaskFinished {
        task: String,
        executed: usize,
        failed: usize,
    },
    ConfigFailed {
        path: PathBuf,
        message: String,
    },
    InstallStarted {
        package: String,
        version: String,
    },
    InstallSucceeded {
        package: String,
    },
    InstallFailed {
        package: String,
        message: String,
    },
}

/// Sink for [`RunEvent`]s
pub trait Reporter {
    fn report(&mut self, event: RunEvent);
}

/// Discards every event
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _event: RunEvent) {}
}

/// Keeps every event in arrival order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<RunEvent>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: RunEvent) {
        self.events.push(event);
    }
}
