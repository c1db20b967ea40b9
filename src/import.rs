//! Import pipelines populating the virtual file set.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Import Flow                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  folder: Vec<ImportEntry> / read_dir(root) ─┐                │
//! │  archive: ArchiveReader ─► read_archive() ──┤                │
//! │                                             ▼                │
//! │                            decode (parallel with `batch`)    │
//! │                                             │                │
//! │                                             ▼                │
//! │               populate(): binary ─► allocate import handle   │
//! │                           text   ─► FileRecord::text         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clearing the previous set and composing afterwards is the session's job;
//! see [`PreviewSession`](crate::session::PreviewSession).

mod archive;
mod folder;

use log::warn;
#[cfg(feature = "batch")]
use rayon::prelude::*;

pub use archive::{read_archive, ArchiveEntry, ArchiveReader, MapArchive};
#[cfg(feature = "zip")]
pub use archive::ZipArchiveReader;
pub use folder::read_dir;

use crate::error::ImportError;
use crate::file::{decode_utf8, logical_path, FileOrigin, FileRecord, VirtualFileSet};
use crate::resource::{binary_mime, FileKind, ResourceRegistry};

// =============================================================================
// ImportEntry
// =============================================================================

/// Raw content of an entry handed to an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// Undecoded bytes.
    Bytes(Vec<u8>),
    /// Already decoded text.
    Text(String),
}

/// One `(relative path, content)` pair from a folder selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// Directory-qualified relative path, or a bare name.
    pub path: String,
    /// File content.
    pub source: EntrySource,
}

impl ImportEntry {
    /// Entry from raw bytes.
    pub fn bytes(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            source: EntrySource::Bytes(data.into()),
        }
    }

    /// Entry from text.
    pub fn text(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: EntrySource::Text(text.into()),
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

enum Decoded {
    Text(String),
    Binary(Vec<u8>),
}

/// Classify and decode one entry. `Ok(None)` means the entry has no usable path.
fn decode_entry(entry: ImportEntry) -> Result<Option<(String, Decoded)>, ImportError> {
    let Some(path) = logical_path(&entry.path) else {
        return Ok(None);
    };

    let decoded = match (FileKind::classify(&path).is_binary(), entry.source) {
        (true, EntrySource::Bytes(data)) => Decoded::Binary(data),
        (true, EntrySource::Text(text)) => Decoded::Binary(text.into_bytes()),
        (false, EntrySource::Text(text)) => Decoded::Text(text),
        (false, EntrySource::Bytes(data)) => match decode_utf8(&data) {
            Some(text) => Decoded::Text(text.to_string()),
            None => return Err(ImportError::Decode { path }),
        },
    };
    Ok(Some((path, decoded)))
}

/// Decode all entries, preserving input order.
///
/// With the `batch` feature, entries are decoded in parallel using rayon.
fn decode_all(entries: Vec<ImportEntry>) -> Vec<Result<Option<(String, Decoded)>, ImportError>> {
    #[cfg(feature = "batch")]
    {
        entries.into_par_iter().map(decode_entry).collect()
    }

    #[cfg(not(feature = "batch"))]
    {
        entries.into_iter().map(decode_entry).collect()
    }
}

// =============================================================================
// Population
// =============================================================================

/// Insert entries into the file set in input order.
///
/// Binary entries get their import handle here. Duplicate paths are
/// last-write-wins; the replaced record's handle is revoked. Stops at the
/// first decode error, leaving earlier entries in place.
///
/// Returns the number of records inserted.
pub fn populate(
    files: &mut VirtualFileSet,
    registry: &ResourceRegistry,
    entries: Vec<ImportEntry>,
    origin: FileOrigin,
) -> Result<usize, ImportError> {
    let mut inserted = 0;
    for result in decode_all(entries) {
        let (path, decoded) = match result {
            Ok(Some(decoded)) => decoded,
            Ok(None) => continue,
            Err(err) => {
                warn!("import stopped after {inserted} files: {err}");
                return Err(err);
            }
        };

        let record = match decoded {
            Decoded::Text(text) => FileRecord::text(path, text, origin),
            Decoded::Binary(data) => {
                let data: std::sync::Arc<[u8]> = data.into();
                let handle = registry.allocate(data.clone(), binary_mime(&path));
                FileRecord::binary(path, data, handle, origin)
            }
        };
        if let Some(replaced) = files.insert(record)
            && let Some(handle) = replaced.handle()
        {
            registry.revoke(handle);
        }
        inserted += 1;
    }
    Ok(inserted)
}
