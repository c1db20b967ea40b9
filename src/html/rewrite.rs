//! Asset reference rewriting.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::resolve::is_external;

/// `src="…"` / `href="…"` with single or double quotes.
static ASSET_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(src|href)=["']([^"']+)["']"#).expect("asset attribute pattern is valid")
});

/// Result of rewriting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten markup.
    pub markup: String,
    /// Number of attribute values replaced.
    pub rewritten: usize,
    /// Local references nothing matched, in document order.
    pub unresolved: Vec<String>,
}

/// Rewrite every asset attribute value through `lookup`.
///
/// External references (`http:`, `data:`, `//` …) are never passed to
/// `lookup`. A `Some(url)` result replaces the value as `attr="url"`; `None`
/// leaves the original attribute text untouched.
///
/// # Example
///
/// ```
/// use live_preview::html::rewrite_asset_refs;
///
/// let result = rewrite_asset_refs(r#"<img src='a.png'>"#, |value| {
///     (value == "a.png").then(|| "blob:x".to_string())
/// });
/// assert_eq!(result.markup, r#"<img src="blob:x">"#);
/// ```
pub fn rewrite_asset_refs<F>(markup: &str, mut lookup: F) -> Rewrite
where
    F: FnMut(&str) -> Option<String>,
{
    let mut rewritten = 0;
    let mut unresolved = Vec::new();

    let markup = ASSET_ATTR.replace_all(markup, |caps: &Captures| {
        let attribute = &caps[1];
        let value = &caps[2];
        if is_external(value) {
            return caps[0].to_string();
        }
        match lookup(value) {
            Some(url) => {
                rewritten += 1;
                format!("{attribute}=\"{url}\"")
            }
            None => {
                unresolved.push(value.to_string());
                caps[0].to_string()
            }
        }
    });

    Rewrite {
        markup: markup.into_owned(),
        rewritten,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_table(value: &str) -> Option<String> {
        match value.trim_start_matches("./") {
            "style.css" => Some("blob:css".into()),
            "img/logo.png" => Some("blob:png".into()),
            _ => None,
        }
    }

    #[test]
    fn test_rewrites_both_attributes_and_quotes() {
        let html = r#"<link href="style.css"><img src='./img/logo.png'>"#;
        let result = rewrite_asset_refs(html, lookup_table);

        assert_eq!(result.markup, r#"<link href="blob:css"><img src="blob:png">"#);
        assert_eq!(result.rewritten, 2);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_unresolved_left_untouched() {
        let html = r#"<script src="missing.js"></script><a href='#top'>up</a>"#;
        let result = rewrite_asset_refs(html, lookup_table);

        assert_eq!(result.markup, html);
        assert_eq!(result.rewritten, 0);
        assert_eq!(result.unresolved, vec!["missing.js", "#top"]);
    }

    #[test]
    fn test_external_never_looked_up() {
        let html = concat!(
            r#"<link href="https://cdn.example/style.css">"#,
            r#"<img src="data:image/png;base64,AAAA">"#,
            r#"<script src="//cdn.example/style.css"></script>"#,
        );
        let result = rewrite_asset_refs(html, |value| panic!("looked up {value}"));

        assert_eq!(result.markup, html);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_malformed_markup_degrades() {
        let html = r#"<img src="style.css><p href=>"#;
        let result = rewrite_asset_refs(html, lookup_table);
        assert_eq!(result.markup, html);
    }
}
