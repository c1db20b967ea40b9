//! Virtual file set.

use rustc_hash::FxHashMap;

use super::bootstrap::DEFAULT_FILES;
use super::record::{FileOrigin, FileRecord};
use crate::resource::{extension, AssetHandle, FileKind};

/// Mapping from logical path to file record.
///
/// At most one record exists per path. Iteration order is unspecified;
/// presenters use [`sorted_paths`](Self::sorted_paths) or
/// [`code_paths`](Self::code_paths).
#[derive(Debug, Default, Clone)]
pub struct VirtualFileSet {
    files: FxHashMap<String, FileRecord>,
}

impl VirtualFileSet {
    /// Create an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced (last write wins).
    pub fn insert(&mut self, record: FileRecord) -> Option<FileRecord> {
        self.files.insert(record.path().to_string(), record)
    }

    /// Look up a record.
    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    /// Check if a path exists.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all logical paths (unordered).
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Iterate over all records (unordered).
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.values()
    }

    /// All logical paths in lexicographic order.
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.paths().collect();
        paths.sort_unstable();
        paths
    }

    /// Editable code files in tab order: html, css, js, then by path.
    pub fn code_paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self
            .records()
            .filter(|record| record.kind() == FileKind::Code)
            .map(FileRecord::path)
            .collect();
        paths.sort_unstable_by(|a, b| tab_rank(a).cmp(&tab_rank(b)).then(a.cmp(b)));
        paths
    }

    /// Import-time handles of every binary record.
    pub fn binary_handles(&self) -> impl Iterator<Item = &AssetHandle> {
        self.records().filter_map(FileRecord::handle)
    }

    /// Replace the text of one record.
    ///
    /// Returns `false` if the path is unknown or names a binary record.
    pub fn set_text(&mut self, path: &str, text: impl Into<String>) -> bool {
        self.files
            .get_mut(path)
            .is_some_and(|record| record.replace_text(text.into()))
    }

    /// Find the entry document for the given file name.
    ///
    /// Matches any path ending in `name`. Whole-segment matches (`name` or
    /// `dir/name`) win over longer file names such as `myindex.html`; within
    /// each group the shortest path wins, then the first in lexicographic
    /// order.
    pub fn entry_path(&self, name: &str) -> Option<&str> {
        self.paths()
            .filter_map(|path| {
                let head = path.strip_suffix(name)?;
                let segment = head.is_empty() || head.ends_with('/');
                Some((!segment, path))
            })
            .min_by(|(a_partial, a), (b_partial, b)| {
                a_partial
                    .cmp(b_partial)
                    .then(a.len().cmp(&b.len()))
                    .then(a.cmp(b))
            })
            .map(|(_, path)| path)
    }

    /// Remove every record, returning them for handle cleanup.
    pub fn take_all(&mut self) -> Vec<FileRecord> {
        self.files.drain().map(|(_, record)| record).collect()
    }

    /// Populate the fixed default documents.
    ///
    /// Does nothing unless the set is empty.
    pub fn bootstrap(&mut self) -> bool {
        if !self.is_empty() {
            return false;
        }
        for (path, text) in DEFAULT_FILES {
            self.insert(FileRecord::text(path, text, FileOrigin::Bootstrap));
        }
        true
    }
}

fn tab_rank(path: &str) -> u8 {
    match extension(path).as_deref() {
        Some("html" | "htm") => 1,
        Some("css") => 2,
        Some("js") => 3,
        _ => 99,
    }
}
