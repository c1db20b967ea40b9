//! Relative reference resolution against the file set's path universe.
//!
//! A reference such as `css/style.css` matches a logical path when the path
//! ends with it on a segment boundary:
//!
//! ```text
//! reference "style.css"
//!   "style.css"          ✓ exact
//!   "site/css/style.css" ✓ preceded by '/'
//!   "mystyle.css"        ✗ preceded by 'y'
//! ```
//!
//! Matching is literal. There is no `..` handling and no module resolution.

/// Check if a reference points outside the virtual file set.
///
/// True for empty references, protocol-relative references (`//host/...`)
/// and anything carrying a URL scheme (`http:`, `https:`, `data:`, `blob:` …).
pub fn is_external(reference: &str) -> bool {
    reference.is_empty() || reference.starts_with("//") || has_scheme(reference)
}

fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Strip a leading `./` from a reference.
#[inline]
pub fn clean_reference(reference: &str) -> &str {
    reference.strip_prefix("./").unwrap_or(reference)
}

/// Check if `path` ends with `reference` on a segment boundary.
pub fn suffix_matches(path: &str, reference: &str) -> bool {
    path.strip_suffix(reference)
        .is_some_and(|head| head.is_empty() || head.ends_with('/'))
}

/// Resolve a reference to the best matching logical path.
///
/// Returns `None` for external references and for references nothing
/// matches; callers leave those untouched.
///
/// When several paths match, an exact match wins, then the shortest path,
/// then the first in lexicographic order. The result never depends on the
/// iteration order of `paths`.
///
/// # Example
///
/// ```
/// use live_preview::resolve::resolve;
///
/// let paths = ["css/style.css", "mystyle.css"];
/// assert_eq!(resolve("./style.css", paths), Some("css/style.css"));
/// assert_eq!(resolve("https://cdn.example/style.css", paths), None);
/// ```
pub fn resolve<'a, I>(reference: &str, paths: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if is_external(reference) {
        return None;
    }
    let reference = clean_reference(reference);
    if reference.is_empty() {
        return None;
    }

    paths
        .into_iter()
        .filter(|path| suffix_matches(path, reference))
        .min_by(|a, b| {
            let exact_a = *a == reference;
            let exact_b = *b == reference;
            exact_b
                .cmp(&exact_a)
                .then(a.len().cmp(&b.len()))
                .then(a.cmp(b))
        })
}
