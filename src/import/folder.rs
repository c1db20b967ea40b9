//! Folder import from an on-disk directory.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::ImportEntry;
use crate::error::ImportError;

/// Collect every file under `root` as import entries.
///
/// Logical paths are relative to `root` with `/` separators. Entries are
/// returned in file-name order so repeated imports are deterministic.
pub fn read_dir(root: &Path) -> Result<Vec<ImportEntry>, ImportError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            ImportError::io(path, err.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let data = fs::read(entry.path()).map_err(|err| ImportError::io(entry.path(), err))?;
        entries.push(ImportEntry::bytes(path, data));
    }
    Ok(entries)
}
