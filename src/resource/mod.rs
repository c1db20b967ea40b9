//! Revocable resources backing a preview (asset handles and content types).

mod mime;
mod registry;

pub use mime::{binary_mime, extension, text_mime, FileKind, HTML_MIME};
pub use registry::{Asset, AssetHandle, ResourceRegistry, HANDLE_PREFIX};
