//! Archive import boundary.

#[cfg(feature = "zip")]
use std::io::{Cursor, Read};

use super::ImportEntry;
use crate::error::ImportError;

/// One entry listed by an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// An archive decoding collaborator.
pub trait ArchiveReader {
    /// List all entries, directories included.
    fn list_entries(&mut self) -> Result<Vec<ArchiveEntry>, ImportError>;

    /// Read the content of a leaf entry.
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ImportError>;
}

/// Read every leaf entry of an archive, skipping directories.
pub fn read_archive<A>(reader: &mut A) -> Result<Vec<ImportEntry>, ImportError>
where
    A: ArchiveReader + ?Sized,
{
    let mut entries = Vec::new();
    for entry in reader.list_entries()? {
        if entry.is_dir {
            continue;
        }
        let data = reader.read_entry(&entry.path)?;
        entries.push(ImportEntry::bytes(entry.path, data));
    }
    Ok(entries)
}

// =============================================================================
// MapArchive
// =============================================================================

/// An in-memory archive with entries in insertion order.
///
/// # Example
///
/// ```
/// use live_preview::import::{read_archive, MapArchive};
///
/// let mut archive = MapArchive::new();
/// archive.insert_dir("site/");
/// archive.insert("site/index.html", "<h1>Hi</h1>");
/// assert_eq!(read_archive(&mut archive).unwrap().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MapArchive {
    entries: Vec<(String, Option<Vec<u8>>)>,
}

impl MapArchive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file entry.
    pub fn insert(&mut self, path: impl Into<String>, content: impl AsRef<[u8]>) {
        self.entries.push((path.into(), Some(content.as_ref().to_vec())));
    }

    /// Add a directory entry.
    pub fn insert_dir(&mut self, path: impl Into<String>) {
        self.entries.push((path.into(), None));
    }
}

impl ArchiveReader for MapArchive {
    fn list_entries(&mut self) -> Result<Vec<ArchiveEntry>, ImportError> {
        Ok(self
            .entries
            .iter()
            .map(|(path, content)| ArchiveEntry {
                path: path.clone(),
                is_dir: content.is_none(),
            })
            .collect())
    }

    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ImportError> {
        self.entries
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .and_then(|(_, content)| content.clone())
            .ok_or_else(|| ImportError::archive(format!("no file entry {path}")))
    }
}

// =============================================================================
// ZipArchiveReader
// =============================================================================

/// Zip archive reader over in-memory bytes.
#[cfg(feature = "zip")]
pub struct ZipArchiveReader {
    archive: zip::ZipArchive<Cursor<Vec<u8>>>,
}

#[cfg(feature = "zip")]
impl ZipArchiveReader {
    /// Open a zip archive from its raw bytes.
    pub fn new(bytes: Vec<u8>) -> Result<Self, ImportError> {
        let archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|err| ImportError::archive(err.to_string()))?;
        Ok(Self { archive })
    }
}

#[cfg(feature = "zip")]
impl ArchiveReader for ZipArchiveReader {
    fn list_entries(&mut self) -> Result<Vec<ArchiveEntry>, ImportError> {
        (0..self.archive.len())
            .map(|index| -> Result<ArchiveEntry, ImportError> {
                let file = self
                    .archive
                    .by_index(index)
                    .map_err(|err| ImportError::archive(err.to_string()))?;
                Ok(ArchiveEntry {
                    path: file.name().to_string(),
                    is_dir: file.is_dir(),
                })
            })
            .collect()
    }

    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ImportError> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|err| ImportError::archive(format!("{path}: {err}")))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|err| ImportError::io(path, err))?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_archive_skips_directories() {
        let mut archive = MapArchive::new();
        archive.insert_dir("site/");
        archive.insert("site/index.html", "<p>");
        archive.insert_dir("site/img/");
        archive.insert("site/img/a.png", [1u8, 2]);

        let entries = read_archive(&mut archive).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["site/index.html", "site/img/a.png"]);
    }

    #[test]
    fn test_map_archive_missing_entry() {
        let mut archive = MapArchive::new();
        archive.insert_dir("d/");
        assert!(matches!(archive.read_entry("d/"), Err(ImportError::Archive { .. })));
        assert!(archive.read_entry("x").is_err());
    }

    #[cfg(feature = "zip")]
    #[test]
    fn test_zip_reader() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.add_directory("site/", options).unwrap();
        writer.start_file("site/index.html", options).unwrap();
        writer.write_all(b"<link href=\"style.css\">").unwrap();
        writer.start_file("site/style.css", options).unwrap();
        writer.write_all(b"body{color:red}").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let mut reader = ZipArchiveReader::new(bytes).unwrap();
        let entries = read_archive(&mut reader).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1],
            ImportEntry::bytes("site/style.css", b"body{color:red}".to_vec())
        );
    }

    #[cfg(feature = "zip")]
    #[test]
    fn test_zip_reader_rejects_garbage() {
        let result = ZipArchiveReader::new(b"not a zip".to_vec());
        assert!(matches!(result, Err(ImportError::Archive { .. })));
    }
}
