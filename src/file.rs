//! The virtual file set: logical path to file record.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ VirtualFileSet                                           │
//! │  FxHashMap<String, FileRecord>                           │
//! │    "index.html"    ─► Text("<h1>…")        (editable)    │
//! │    "css/style.css" ─► Text("body{…}")      (editable)    │
//! │    "img/logo.png"  ─► Binary{data, handle} (immutable)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The set is the single source of truth for imported and edited content.
//! Imports replace it wholesale; the editor mutates one text record at a time.

mod bootstrap;
mod record;
mod set;

pub use bootstrap::{DEFAULT_FILES, DEFAULT_ENTRY_HTML, DEFAULT_SCRIPT, DEFAULT_STYLE};
pub use record::{decode_utf8, logical_path, FileContent, FileOrigin, FileRecord};
pub use set::VirtualFileSet;
