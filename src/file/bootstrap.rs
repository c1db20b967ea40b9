//! Default content for an empty file set.

/// Default entry document.
pub const DEFAULT_ENTRY_HTML: &str = "<h1>Welcome!</h1>\n\
<p>Edit the files on the left and the preview rebuilds as you type.</p>\n\
<link rel=\"stylesheet\" href=\"style.css\">\n\
<script src=\"script.js\"></script>";

/// Default stylesheet.
pub const DEFAULT_STYLE: &str = "body { font-family: -apple-system, BlinkMacSystemFont, \
\"Segoe UI\", Roboto; text-align: center; margin-top: 50px; \
background-color: #f0f8ff; } h1 { color: #005a9c; }";

/// Default script.
pub const DEFAULT_SCRIPT: &str = "console.log(\"Welcome to the live preview!\");";

/// The fixed default document set: one HTML, one stylesheet, one script.
pub const DEFAULT_FILES: [(&str, &str); 3] = [
    ("index.html", DEFAULT_ENTRY_HTML),
    ("style.css", DEFAULT_STYLE),
    ("script.js", DEFAULT_SCRIPT),
];
