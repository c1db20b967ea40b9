//! Preview composition.
//!
//! One [`Compositor::compose`] run produces one [`Generation`]:
//!
//! ```text
//! VirtualFileSet ──► entry document ──► ensure_viewport
//!        │                                   │
//!        ├─► text files   ─► fresh handles ──┤
//!        └─► binary files ─► import handles ─┤
//!                                            ▼
//!                          rewrite src/href via resolve()
//!                                            │
//!                                            ▼
//!                       root handle ─► surface.set_source()
//!                                            │
//!                                            ▼
//!                          revoke previous generation
//! ```
//!
//! The previous generation stays live until the new root is installed, so the
//! surface never points at revoked content.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use rustc_hash::FxHashMap;

use crate::config::PreviewConfig;
use crate::file::{FileContent, FileRecord, VirtualFileSet};
use crate::host::PreviewSurface;
use crate::html::{ensure_viewport, rewrite_asset_refs};
use crate::resolve::resolve;
use crate::resource::{text_mime, AssetHandle, ResourceRegistry, HTML_MIME};

// =============================================================================
// Generation
// =============================================================================

/// One installed preview build and the handles it uses.
#[derive(Debug, Clone)]
pub struct Generation {
    number: u64,
    entry: String,
    root: AssetHandle,
    assets: FxHashMap<String, AssetHandle>,
    owned: Vec<AssetHandle>,
    unresolved: Vec<String>,
    markup: String,
    built_at: DateTime<Utc>,
}

impl Generation {
    /// Sequence number, starting at 1 for each compositor.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Logical path of the entry document.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Handle of the composed root document.
    pub fn root(&self) -> &AssetHandle {
        &self.root
    }

    /// Handle for every file in the set, keyed by logical path.
    pub fn assets(&self) -> &FxHashMap<String, AssetHandle> {
        &self.assets
    }

    /// Handle for one file.
    pub fn asset(&self, path: &str) -> Option<&AssetHandle> {
        self.assets.get(path)
    }

    /// Every handle this generation uses, root included.
    pub fn handle_count(&self) -> usize {
        self.assets.len() + 1
    }

    /// Handles allocated for this generation alone (text files and root).
    ///
    /// Binary import handles are shared across generations and not listed.
    pub fn owned_handles(&self) -> &[AssetHandle] {
        &self.owned
    }

    /// Local references in the entry document that matched no file.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// The composed markup behind [`root`](Self::root).
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// When the generation was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

// =============================================================================
// Compositor
// =============================================================================

/// Builds generations and retires the previous one.
#[derive(Debug)]
pub struct Compositor {
    registry: Arc<ResourceRegistry>,
    entry_name: String,
    viewport: Option<String>,
    active: Option<Generation>,
    next_number: u64,
}

impl Compositor {
    /// Create a compositor allocating from `registry`.
    pub fn new(registry: Arc<ResourceRegistry>, config: &PreviewConfig) -> Self {
        Self {
            registry,
            entry_name: config.entry_name.clone(),
            viewport: config.viewport.clone(),
            active: None,
            next_number: 1,
        }
    }

    /// The generation currently installed.
    pub fn active(&self) -> Option<&Generation> {
        self.active.as_ref()
    }

    /// Compose the file set and install the result.
    ///
    /// Returns `None` without touching the surface when there is no entry
    /// document; the previous generation then stays active.
    pub fn compose<S>(&mut self, files: &VirtualFileSet, surface: &mut S) -> Option<&Generation>
    where
        S: PreviewSurface + ?Sized,
    {
        let Some(entry) = files.entry_path(&self.entry_name) else {
            debug!("no {} in file set, keeping current preview", self.entry_name);
            return None;
        };
        let source = files.get(entry).and_then(FileRecord::as_text).unwrap_or_default();
        let source = match &self.viewport {
            Some(content) => ensure_viewport(source, content),
            None => Cow::Borrowed(source),
        };

        let mut assets = FxHashMap::default();
        let mut owned = Vec::new();
        for record in files.records() {
            let handle = match record.content() {
                FileContent::Text(text) => {
                    let handle = self.registry.allocate_text(text, text_mime(record.path()));
                    owned.push(handle.clone());
                    handle
                }
                FileContent::Binary { handle, .. } => handle.clone(),
            };
            assets.insert(record.path().to_string(), handle);
        }

        let rewrite = rewrite_asset_refs(&source, |value| {
            let path = resolve(value, assets.keys().map(String::as_str))?;
            assets.get(path).map(|handle| handle.url().to_string())
        });
        for reference in &rewrite.unresolved {
            debug!("unresolved reference in {entry}: {reference}");
        }

        let root = self.registry.allocate_text(&rewrite.markup, HTML_MIME);
        owned.push(root.clone());

        let generation = Generation {
            number: self.next_number,
            entry: entry.to_string(),
            root,
            assets,
            owned,
            unresolved: rewrite.unresolved,
            markup: rewrite.markup,
            built_at: Utc::now(),
        };
        self.next_number += 1;

        surface.set_source(Some(&generation.root));
        if let Some(previous) = self.active.replace(generation) {
            self.registry.revoke_all(previous.owned_handles());
        }

        let active = self.active.as_ref()?;
        debug!(
            "installed generation {} from {} ({} handles, {} rewritten)",
            active.number,
            active.entry,
            active.handle_count(),
            rewrite.rewritten,
        );
        Some(active)
    }

    /// Blank the surface and revoke the active generation.
    pub fn retire<S>(&mut self, surface: &mut S)
    where
        S: PreviewSurface + ?Sized,
    {
        surface.set_source(None);
        if let Some(previous) = self.active.take() {
            debug!("retired generation {}", previous.number);
            self.registry.revoke_all(previous.owned_handles());
        }
    }
}
