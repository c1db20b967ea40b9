//! Host collaborator boundaries: the editor widget and the rendering surface.
//!
//! The session only talks to these traits. [`BufferEditor`] and
//! [`MemorySurface`] are in-memory implementations for headless hosts and
//! tests.

use crate::resource::{extension, AssetHandle};

// =============================================================================
// Rendering Surface
// =============================================================================

/// Where composed previews are installed.
pub trait PreviewSurface {
    /// Install a new root artifact, or reset to blank with `None`.
    fn set_source(&mut self, source: Option<&AssetHandle>);
}

/// Surface that remembers the installed root.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    source: Option<AssetHandle>,
    installs: usize,
}

impl MemorySurface {
    /// Create a blank surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently installed root, `None` when blank.
    pub fn source(&self) -> Option<&AssetHandle> {
        self.source.as_ref()
    }

    /// Number of non-blank installs so far.
    pub fn installs(&self) -> usize {
        self.installs
    }
}

impl PreviewSurface for MemorySurface {
    fn set_source(&mut self, source: Option<&AssetHandle>) {
        if source.is_some() {
            self.installs += 1;
        }
        self.source = source.cloned();
    }
}

// =============================================================================
// Editor
// =============================================================================

/// Syntax highlighting mode for the editor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxMode {
    /// HTML with embedded CSS and JavaScript.
    #[default]
    Html,
    /// Stylesheets.
    Css,
    /// Scripts.
    JavaScript,
}

impl SyntaxMode {
    /// Pick a mode from a logical path.
    pub fn for_path(path: &str) -> Self {
        match extension(path).as_deref() {
            Some("css") => Self::Css,
            Some("js") => Self::JavaScript,
            _ => Self::Html,
        }
    }
}

/// The text-editing widget.
///
/// Change notifications are not part of the trait; the host forwards them as
/// [`Command::EditorChanged`](crate::session::Command::EditorChanged).
pub trait Editor {
    /// Current text.
    fn value(&self) -> String;

    /// Replace the whole text.
    fn set_value(&mut self, text: &str);

    /// Switch syntax highlighting.
    fn set_syntax_mode(&mut self, mode: SyntaxMode);
}

/// Editor backed by a plain string.
#[derive(Debug, Default, Clone)]
pub struct BufferEditor {
    text: String,
    mode: SyntaxMode,
}

impl BufferEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current syntax mode.
    pub fn mode(&self) -> SyntaxMode {
        self.mode
    }
}

impl Editor for BufferEditor {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_syntax_mode(&mut self, mode: SyntaxMode) {
        self.mode = mode;
    }
}
