//! A single file in the virtual file set.

use std::sync::Arc;

use crate::resource::{AssetHandle, FileKind};

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOrigin {
    /// Folder selection or on-disk directory.
    Folder,
    /// Entry of an imported archive.
    Archive,
    /// Default content inserted into an empty set.
    Bootstrap,
}

/// Content of a record.
///
/// The variant is fixed at creation, so a record never switches between text
/// and binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// UTF-8 text, replaced wholesale on edit.
    Text(String),
    /// Opaque payload with the handle allocated when it was imported.
    Binary {
        /// Raw bytes.
        data: Arc<[u8]>,
        /// Import-time handle, reused by every generation.
        handle: AssetHandle,
    },
}

/// One imported or authored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: String,
    content: FileContent,
    origin: FileOrigin,
}

impl FileRecord {
    /// Create a text record.
    pub fn text(path: impl Into<String>, text: impl Into<String>, origin: FileOrigin) -> Self {
        Self {
            path: path.into(),
            content: FileContent::Text(text.into()),
            origin,
        }
    }

    /// Create a binary record around an already allocated handle.
    pub fn binary(
        path: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        handle: AssetHandle,
        origin: FileOrigin,
    ) -> Self {
        Self {
            path: path.into(),
            content: FileContent::Binary {
                data: data.into(),
                handle,
            },
            origin,
        }
    }

    /// Logical path of the record.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Record content.
    #[inline]
    pub fn content(&self) -> &FileContent {
        &self.content
    }

    /// Where the record came from.
    #[inline]
    pub fn origin(&self) -> FileOrigin {
        self.origin
    }

    /// Whether the record holds binary content.
    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self.content, FileContent::Binary { .. })
    }

    /// Classification of the record by its path.
    pub fn kind(&self) -> FileKind {
        if self.is_binary() {
            FileKind::Binary
        } else {
            match FileKind::classify(&self.path) {
                // A binary-looking name supplied as text stays text.
                FileKind::Binary => FileKind::Text,
                kind => kind,
            }
        }
    }

    /// Text content, if this is a text record.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(text) => Some(text),
            FileContent::Binary { .. } => None,
        }
    }

    /// Import-time handle, if this is a binary record.
    pub fn handle(&self) -> Option<&AssetHandle> {
        match &self.content {
            FileContent::Binary { handle, .. } => Some(handle),
            FileContent::Text(_) => None,
        }
    }

    /// Replace the text content. Returns `false` for binary records.
    pub(crate) fn replace_text(&mut self, text: String) -> bool {
        match &mut self.content {
            FileContent::Text(current) => {
                *current = text;
                true
            }
            FileContent::Binary { .. } => false,
        }
    }
}

/// Normalize an imported path into a logical path.
///
/// Backslashes become `/`, and leading `/` or `./` segments are dropped.
/// Returns `None` for paths with nothing left.
pub fn logical_path(raw: &str) -> Option<String> {
    let mut path = raw.replace('\\', "/");
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest.to_string();
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest.to_string();
        } else {
            break;
        }
    }
    (!path.is_empty()).then_some(path)
}

/// Decode UTF-8 text, stripping a leading byte order mark.
pub fn decode_utf8(buf: &[u8]) -> Option<&str> {
    let buf = buf.strip_prefix(b"\xef\xbb\xbf").unwrap_or(buf);
    std::str::from_utf8(buf).ok()
}
