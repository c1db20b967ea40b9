//! Configuration for preview sessions.
//!
//! Use [`ConfigBuilder`] to override defaults, then hand the resulting
//! [`PreviewConfig`] to a [`PreviewSession`](crate::session::PreviewSession).

use std::time::Duration;

/// Default idle gap between the last edit and the next rebuild.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default entry document name.
pub const DEFAULT_ENTRY: &str = "index.html";

/// Default viewport directive inserted into the entry document.
pub const DEFAULT_VIEWPORT: &str = "width=device-width, initial-scale=1.0";

/// Runtime configuration for a preview session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Minimum idle gap between the last editor change and a rebuild.
    pub debounce: Duration,
    /// File name identifying the entry document.
    pub entry_name: String,
    /// Viewport directive to ensure in the entry document, or `None` to
    /// leave the markup as authored.
    pub viewport: Option<String>,
    /// Text shown in the editor after a clear.
    pub empty_editor_text: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            entry_name: DEFAULT_ENTRY.to_string(),
            viewport: Some(DEFAULT_VIEWPORT.to_string()),
            empty_editor_text: "// Editor is empty".to_string(),
        }
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    debounce: Option<Duration>,
    entry_name: Option<String>,
    viewport: Option<Option<String>>,
    empty_editor_text: Option<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debounce delay for editor-triggered rebuilds.
    ///
    /// Default: 500ms
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    /// Set the entry document name.
    ///
    /// Default: "index.html"
    ///
    /// # Example
    ///
    /// ```
    /// use live_preview::config::ConfigBuilder;
    ///
    /// let config = ConfigBuilder::new().entry_name("main.html").build();
    /// assert_eq!(config.entry_name, "main.html");
    /// ```
    pub fn entry_name(mut self, name: impl Into<String>) -> Self {
        self.entry_name = Some(name.into());
        self
    }

    /// Set the viewport directive content.
    pub fn viewport(mut self, content: impl Into<String>) -> Self {
        self.viewport = Some(Some(content.into()));
        self
    }

    /// Leave the entry document's viewport untouched.
    pub fn no_viewport(mut self) -> Self {
        self.viewport = Some(None);
        self
    }

    /// Set the placeholder text the editor shows after a clear.
    pub fn empty_editor_text(mut self, text: impl Into<String>) -> Self {
        self.empty_editor_text = Some(text.into());
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    pub fn build(self) -> PreviewConfig {
        let defaults = PreviewConfig::default();
        PreviewConfig {
            debounce: self.debounce.unwrap_or(defaults.debounce),
            entry_name: self.entry_name.unwrap_or(defaults.entry_name),
            viewport: self.viewport.unwrap_or(defaults.viewport),
            empty_editor_text: self
                .empty_editor_text
                .unwrap_or(defaults.empty_editor_text),
        }
    }
}
