//! YAML document discovery
//!
//! Walks a root directory recursively and yields every regular file whose
//! name ends in `.yaml`. Entries are visited in file-name order so repeated
//! runs over the same tree produce the same sequence. Symlinks are not
//! followed.

use crate::config::YAML_SUFFIX;
use crate::{Result, XrefError};
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Discovers YAML documents below a root directory
#[derive(Debug, Clone)]
pub struct YamlDiscovery {
    root: PathBuf,
    exclude_dirs: Vec<String>,
}

impl YamlDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_dirs: Vec::new(),
        }
    }

    /// Skip any directory (below the root) whose name is in `exclude_dirs`
    pub fn with_exclude_dirs(mut self, exclude_dirs: &[String]) -> Self {
        self.exclude_dirs = exclude_dirs.to_vec();
        self
    }

    /// Collect all YAML files below the root.
    ///
    /// The first unreadable entry aborts the walk with a [`XrefError::WalkError`].
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = entry.map_err(|e| XrefError::walk_error(&self.root, e))?;
            if entry.file_type().is_file() && is_yaml_name(entry.file_name()) {
                files.push(entry.into_path());
            }
        }

        debug!(
            "Discovered {} YAML files in {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .exclude_dirs
                .iter()
                .any(|name| entry.file_name() == name.as_str())
    }
}

fn is_yaml_name(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().ends_with(YAML_SUFFIX)
}
