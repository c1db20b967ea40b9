//! # live-preview
//!
//! A virtual file set and live preview compositor.
//!
//! Files imported from a folder selection or an archive live in an in-memory
//! [`VirtualFileSet`]. Every rebuild composes the entry document into one
//! self-contained page:
//!
//! - **Asset handles**: each file is materialized behind a revocable handle
//!   from the [`ResourceRegistry`]
//! - **Reference rewriting**: `src`/`href` values in the entry document are
//!   matched against logical paths and replaced with handle URLs
//! - **Generations**: the previous build's handles are revoked right after the
//!   new root is installed, so repeated edits never leak
//! - **Debounced editing**: bursts of editor changes collapse into one rebuild
//!
//! ## Quick Start
//!
//! ```ignore
//! use live_preview::prelude::*;
//!
//! let mut session = PreviewSession::new(
//!     PreviewConfig::default(),
//!     BufferEditor::new(),
//!     MemorySurface::new(),
//! );
//!
//! // Import a directory and compose the first preview
//! session.import_dir(Path::new("site"))?;
//!
//! // Forward editor changes and timer ticks from the host event loop
//! session.dispatch(Command::EditorChanged { at: Instant::now() })?;
//! session.dispatch(Command::Tick { now: Instant::now() })?;
//!
//! let root = session.surface().source().unwrap();
//! let page = session.registry().fetch(root).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`session`]: command dispatch over one preview session
//! - [`compose`]: generation building and retirement
//! - [`resolve`]: reference to logical path matching
//! - [`html`]: markup rewriting and viewport normalization
//! - [`mod@file`]: the virtual file set
//! - [`import`]: folder and archive import pipelines
//! - [`resource`]: asset handles and content types
//! - [`host`]: editor and rendering surface boundaries
//! - [`config`]: session configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compose;
pub mod config;
pub mod error;
pub mod file;
pub mod host;
pub mod html;
pub mod import;
pub mod resolve;
pub mod resource;
pub mod session;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use live_preview::prelude::*;
/// ```
pub mod prelude {
    // Session
    pub use crate::{Command, Event, PreviewSession};

    // Configuration
    pub use crate::{ConfigBuilder, PreviewConfig};

    // Host collaborators
    pub use crate::{BufferEditor, Editor, MemorySurface, PreviewSurface, SyntaxMode};

    // Import
    pub use crate::{ArchiveReader, ImportEntry, ImportError, MapArchive};

    // Files and handles
    pub use crate::{AssetHandle, FileRecord, Generation, ResourceRegistry, VirtualFileSet};
}

// =============================================================================
// Re-exports
// =============================================================================

pub use compose::{Compositor, Generation};
pub use config::{ConfigBuilder, PreviewConfig};
pub use error::ImportError;
pub use file::{FileContent, FileOrigin, FileRecord, VirtualFileSet};
pub use host::{BufferEditor, Editor, MemorySurface, PreviewSurface, SyntaxMode};
pub use import::{ArchiveEntry, ArchiveReader, EntrySource, ImportEntry, MapArchive};
#[cfg(feature = "zip")]
pub use import::ZipArchiveReader;
pub use resolve::resolve;
pub use resource::{Asset, AssetHandle, FileKind, ResourceRegistry};
pub use session::{Command, Debouncer, Event, PreviewSession};
