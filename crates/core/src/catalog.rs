//! Directory scanner for the two-level `<group>/<item>` task layout
//!
//! Every listing is a fresh snapshot of the filesystem. Entries are sorted by
//! name so that execution and dependency merge order do not depend on the
//! platform's directory enumeration order.

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::configs::RunnerConfig;
use crate::results::GroupListing;
use crate::types::{TaskdirError, TaskdirResult};

/// Classification of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Group,
    Script,
    Binary,
    Config,
    Other,
}

impl EntryKind {
    /// Whether members of this kind are launched when their group runs
    pub fn is_executable(self) -> bool {
        matches!(self, EntryKind::Script | EntryKind::Binary)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Group => "group",
            EntryKind::Script => "script",
            EntryKind::Binary => "binary",
            EntryKind::Config => "config",
            EntryKind::Other => "other",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One discoverable node of the task tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// `group` for groups, `group/item` for members. Used as the lookup key.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub kind: EntryKind,
}

impl CatalogEntry {
    /// Last segment of the relative path
    pub fn name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}

/// Walks the configured task root and classifies what it finds
#[derive(Debug)]
pub struct Scanner {
    tasks_root: PathBuf,
    script_extensions: Vec<String>,
    binary_extensions: Vec<String>,
    config_extensions: Vec<String>,
    excludes: GlobSet,
}

impl Scanner {
    pub fn new(tasks_root: PathBuf, config: &RunnerConfig) -> Self {
        let mut exclude_builder = GlobSetBuilder::new();
        for pattern in &config.excludes {
            match Glob::new(pattern) {
                Ok(glob) => {
                    exclude_builder.add(glob);
                }
                Err(e) => log::warn!("Ignoring invalid exclude pattern '{}': {}", pattern, e),
            }
        }
        let excludes = exclude_builder.build().unwrap_or_default();

        Self {
            tasks_root,
            script_extensions: config.script_extensions.clone(),
            binary_extensions: config.binary_extensions.clone(),
            config_extensions: config.config_extensions.clone(),
            excludes,
        }
    }

    pub fn tasks_root(&self) -> &Path {
        &self.tasks_root
    }

    /// Classify a file by extension alone. A missing extension is the empty string.
    pub fn classify(&self, path: &Path) -> EntryKind {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.binary_extensions.contains(&extension) {
            EntryKind::Binary
        } else if self.script_extensions.contains(&extension) {
            EntryKind::Script
        } else if self.config_extensions.contains(&extension) {
            EntryKind::Config
        } else {
            EntryKind::Other
        }
    }

    /// Immediate subdirectories of the task root, sorted by name
    pub fn list_groups(&self) -> TaskdirResult<Vec<CatalogEntry>> {
        let groups = read_sorted_dir(&self.tasks_root)?
            .into_iter()
            .filter(|(_, path)| path.is_dir())
            .filter(|(name, _)| !self.is_excluded(name))
            .map(|(name, path)| CatalogEntry {
                relative_path: name,
                absolute_path: path,
                kind: EntryKind::Group,
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Found {} group(s) under {}",
            groups.len(),
            self.tasks_root.display()
        );
        Ok(groups)
    }

    /// Exact-match lookup of a group by its relative path
    pub fn find_group(&self, name: &str) -> TaskdirResult<Option<CatalogEntry>> {
        Ok(self
            .list_groups()?
            .into_iter()
            .find(|group| group.relative_path == name))
    }

    /// Immediate files of a group, sorted by name and classified.
    ///
    /// An unknown group yields an empty list rather than an error.
    pub fn list_group_members(&self, group: &str) -> TaskdirResult<Vec<CatalogEntry>> {
        if !is_plain_name(group) || self.is_excluded(group) {
            return Ok(Vec::new());
        }

        let group_dir = self.tasks_root.join(group);
        if !group_dir.is_dir() {
            log::debug!("Group '{}' not found under {}", group, self.tasks_root.display());
            return Ok(Vec::new());
        }

        self.read_members(group, &group_dir)
    }

    /// Members of a group already resolved from [`Scanner::list_groups`].
    ///
    /// Reads the group's `absolute_path`, so names that are not valid UTF-8 still
    /// resolve. A directory that cannot be read is an error.
    pub fn members_of(&self, group: &CatalogEntry) -> TaskdirResult<Vec<CatalogEntry>> {
        self.read_members(&group.relative_path, &group.absolute_path)
    }

    /// Config members of a resolved group
    pub fn config_members_of(&self, group: &CatalogEntry) -> TaskdirResult<Vec<CatalogEntry>> {
        Ok(self
            .members_of(group)?
            .into_iter()
            .filter(|member| member.kind == EntryKind::Config)
            .collect())
    }

    /// Every group with its members. A group that cannot be read is listed with
    /// its error and the remaining groups are still read.
    pub fn list_groups_with_members(&self) -> TaskdirResult<Vec<GroupListing>> {
        Ok(self.listings_for(self.list_groups()?))
    }

    /// Every config member of every group, in group order then member order.
    ///
    /// Unreadable groups are logged and skipped.
    pub fn list_config_entries(&self) -> TaskdirResult<Vec<CatalogEntry>> {
        let mut entries = Vec::new();
        for group in self.list_groups()? {
            match self.config_members_of(&group) {
                Ok(members) => entries.extend(members),
                Err(e) => log::warn!("Skipping group '{}': {}", group.relative_path, e),
            }
        }
        Ok(entries)
    }

    fn listings_for(&self, groups: Vec<CatalogEntry>) -> Vec<GroupListing> {
        groups
            .into_iter()
            .map(|group| match self.members_of(&group) {
                Ok(members) => GroupListing {
                    group,
                    members,
                    error: None,
                },
                Err(e) => {
                    log::warn!("Could not read group '{}': {}", group.relative_path, e);
                    GroupListing {
                        group,
                        members: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect()
    }

    fn read_members(&self, group: &str, group_dir: &Path) -> TaskdirResult<Vec<CatalogEntry>> {
        Ok(read_dir_entries(group_dir)?
            .into_iter()
            .filter(|(_, path)| path.is_file())
            .map(|(name, path)| (format!("{}/{}", group, name), path))
            .filter(|(relative_path, _)| !self.is_excluded(relative_path))
            .map(|(relative_path, path)| CatalogEntry {
                kind: self.classify(&path),
                relative_path,
                absolute_path: path,
            })
            .collect())
    }

    fn is_excluded(&self, relative_path: &str) -> bool {
        self.excludes.is_match(relative_path)
    }
}

/// A single path segment that cannot escape the task root
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Directory entries as `(name, path)` sorted by name. A missing directory is empty.
fn read_sorted_dir(dir: &Path) -> TaskdirResult<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    read_dir_entries(dir)
}

/// Directory entries as `(name, path)` sorted by name
fn read_dir_entries(dir: &Path) -> TaskdirResult<Vec<(String, PathBuf)>> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| {
        TaskdirError::Path(format!("Failed to read directory {}: {}", dir.display(), e))
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| {
            TaskdirError::Path(format!(
                "Failed to read entry in {}: {}",
                dir.display(),
                e
            ))
        })?;
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
