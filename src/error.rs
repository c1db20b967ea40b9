//! Import error type.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for import pipeline failures.
///
/// An import stops at the first error. The file set has already been cleared
/// at that point, so whatever was populated before the failure stays in place.
///
/// # Example
///
/// ```ignore
/// match session.import_folder(entries) {
///     Ok(event) => { /* preview rebuilt */ }
///     Err(ImportError::Decode { path }) => eprintln!("{path} is not UTF-8"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading a file from disk failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A text file was not valid UTF-8.
    #[error("file is not valid UTF-8: {path}")]
    Decode {
        /// Logical path of the offending file.
        path: String,
    },

    /// The archive collaborator failed to list or read an entry.
    #[error("archive error: {message}")]
    Archive {
        /// Error message from the archive reader.
        message: String,
    },
}

impl ImportError {
    /// Create an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }
}
