//! Entry document markup processing.
//!
//! Both passes work on the raw text with regular expressions. Markup that does
//! not match is left exactly as authored; nothing here reports an error.

mod rewrite;
mod viewport;

pub use rewrite::{rewrite_asset_refs, Rewrite};
pub use viewport::{ensure_viewport, has_viewport};
