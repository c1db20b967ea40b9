//! Revocable asset handles.
//!
//! # Handle Lifecycle
//!
//! ```text
//! allocate(bytes, mime) ──► AssetHandle ──► fetch() ──► Some(Asset)
//!                                │
//!                           revoke() ──► fetch() ──► None
//! ```
//!
//! Handles are never reused. Every registry gets a process-unique id, so
//! handles from independent sessions never collide either.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// URL scheme prefix of every handle.
pub const HANDLE_PREFIX: &str = "blob:live-preview/";

/// Source of registry ids, shared by all registries in the process.
static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// AssetHandle
// =============================================================================

/// An opaque, dereferenceable, revocable reference to a content blob.
///
/// The handle renders as a URL (`blob:live-preview/<registry>/<seq>`) which is
/// what gets written into composed markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle {
    registry: u64,
    seq: u64,
    url: Arc<str>,
}

impl AssetHandle {
    fn new(registry: u64, seq: u64) -> Self {
        Self {
            registry,
            seq,
            url: format!("{HANDLE_PREFIX}{registry}/{seq}").into(),
        }
    }

    /// The dereferenceable URL form of this handle.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

// =============================================================================
// Asset
// =============================================================================

/// Content stored behind a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    mime: String,
    bytes: Arc<[u8]>,
}

impl Asset {
    /// Content type of the asset.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Raw bytes of the asset.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The asset as text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

// =============================================================================
// ResourceRegistry
// =============================================================================

/// Allocates and revokes asset handles.
///
/// Shared via `Arc` between a session and whatever host surface needs to
/// dereference handles. All methods take `&self`.
pub struct ResourceRegistry {
    id: u64,
    next_seq: AtomicU64,
    live: RwLock<FxHashMap<u64, Asset>>,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistry {
    /// Create an empty registry with a process-unique id.
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            next_seq: AtomicU64::new(1),
            live: RwLock::new(FxHashMap::default()),
        }
    }

    /// Register content and return a fresh handle for it.
    pub fn allocate(&self, bytes: impl Into<Arc<[u8]>>, mime: impl Into<String>) -> AssetHandle {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let asset = Asset {
            mime: mime.into(),
            bytes: bytes.into(),
        };
        self.live.write().insert(seq, asset);
        AssetHandle::new(self.id, seq)
    }

    /// Register UTF-8 text.
    pub fn allocate_text(&self, text: &str, mime: impl Into<String>) -> AssetHandle {
        self.allocate(text.as_bytes(), mime)
    }

    /// Dereference a handle. Returns `None` once the handle is revoked.
    pub fn fetch(&self, handle: &AssetHandle) -> Option<Asset> {
        if handle.registry != self.id {
            return None;
        }
        self.live.read().get(&handle.seq).cloned()
    }

    /// Dereference a handle by its URL form.
    pub fn fetch_url(&self, url: &str) -> Option<Asset> {
        let seq = url
            .strip_prefix(HANDLE_PREFIX)?
            .strip_prefix(&format!("{}/", self.id))?
            .parse()
            .ok()?;
        self.live.read().get(&seq).cloned()
    }

    /// Check whether a handle is still live.
    pub fn is_live(&self, handle: &AssetHandle) -> bool {
        handle.registry == self.id && self.live.read().contains_key(&handle.seq)
    }

    /// Invalidate a handle. Revoking twice is a no-op.
    pub fn revoke(&self, handle: &AssetHandle) {
        if handle.registry == self.id {
            self.live.write().remove(&handle.seq);
        }
    }

    /// Invalidate every handle in the set.
    pub fn revoke_all<'a>(&self, handles: impl IntoIterator<Item = &'a AssetHandle>) {
        let mut live = self.live.write();
        for handle in handles {
            if handle.registry == self.id {
                live.remove(&handle.seq);
            }
        }
    }

    /// Number of live handles.
    pub fn live_count(&self) -> usize {
        self.live.read().len()
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("id", &self.id)
            .field("live", &self.live_count())
            .finish()
    }
}
