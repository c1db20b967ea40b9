//! Extension-based file classification and content types.

/// Content type of composed root documents.
pub const HTML_MIME: &str = "text/html";

const BINARY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp", "ico", "bmp"];
const CODE_EXTENSIONS: &[&str] = &["html", "htm", "css", "js"];

/// How a file is stored and presented, decided once from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Image payload kept as opaque bytes.
    Binary,
    /// Markup, stylesheet or script, editable.
    Code,
    /// Any other text file.
    Text,
}

impl FileKind {
    /// Classify a logical path by its extension (case-insensitive).
    pub fn classify(path: &str) -> Self {
        match extension(path) {
            Some(ext) if BINARY_EXTENSIONS.contains(&ext.as_str()) => Self::Binary,
            Some(ext) if CODE_EXTENSIONS.contains(&ext.as_str()) => Self::Code,
            _ => Self::Text,
        }
    }

    /// Whether files of this kind are stored as bytes.
    #[inline]
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Binary)
    }
}

/// Lowercased extension of the last path segment.
pub fn extension(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() && ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Content type for a text file's handle.
pub fn text_mime(path: &str) -> &'static str {
    match extension(path).as_deref() {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        _ => "text/plain",
    }
}

/// Content type for a binary file's handle, guessed from its extension.
pub fn binary_mime(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(FileKind::classify("img/logo.PNG"), FileKind::Binary);
        assert_eq!(FileKind::classify("photo.jpeg"), FileKind::Binary);
        assert_eq!(FileKind::classify("icons/a.svg"), FileKind::Binary);
        assert_eq!(FileKind::classify("index.htm"), FileKind::Code);
        assert_eq!(FileKind::classify("app.js"), FileKind::Code);
        assert_eq!(FileKind::classify("README"), FileKind::Text);
        assert_eq!(FileKind::classify("data.json"), FileKind::Text);
        assert_eq!(FileKind::classify("png/notes"), FileKind::Text);
    }

    #[test]
    fn test_text_mime() {
        assert_eq!(text_mime("css/style.css"), "text/css");
        assert_eq!(text_mime("main.JS"), "application/javascript");
        assert_eq!(text_mime("about.html"), "text/plain");
        assert_eq!(text_mime("notes.txt"), "text/plain");
    }

    #[test]
    fn test_binary_mime() {
        assert_eq!(binary_mime("a/logo.png"), "image/png");
        assert_eq!(binary_mime("icon.svg"), "image/svg+xml");
        assert_eq!(binary_mime("blob.unknownext"), "application/octet-stream");
    }
}
