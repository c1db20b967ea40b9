//! Viewport directive normalization.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static VIEWPORT_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*\sname\s*=\s*(?:"viewport"|'viewport'|viewport[\s/>])"#)
        .expect("viewport pattern is valid")
});

static HEAD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("head pattern is valid"));

static HTML_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html(?:\s[^>]*)?>").expect("html pattern is valid"));

static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*<!doctype[^>]*>").expect("doctype pattern is valid"));

/// Check if the markup already declares a viewport.
pub fn has_viewport(markup: &str) -> bool {
    VIEWPORT_META.is_match(markup)
}

/// Ensure the markup declares a viewport, inserting one if absent.
///
/// Insertion point, first that applies:
/// 1. right after `<head>`
/// 2. a new `<head>` right after `<html>`
/// 3. a new `<head>` after a leading doctype
/// 4. a new `<head>` at the very start
///
/// Markup that already has a viewport is returned unchanged.
pub fn ensure_viewport<'a>(markup: &'a str, content: &str) -> Cow<'a, str> {
    if has_viewport(markup) {
        return Cow::Borrowed(markup);
    }

    let meta = format!(
        r#"<meta name="viewport" content="{}">"#,
        content.replace('"', "&quot;")
    );

    let (at, insert) = if let Some(head) = HEAD_OPEN.find(markup) {
        (head.end(), meta)
    } else if let Some(html) = HTML_OPEN.find(markup) {
        (html.end(), format!("<head>{meta}</head>"))
    } else if let Some(doctype) = DOCTYPE.find(markup) {
        (doctype.end(), format!("<head>{meta}</head>"))
    } else {
        (0, format!("<head>{meta}</head>"))
    };

    let mut out = String::with_capacity(markup.len() + insert.len());
    out.push_str(&markup[..at]);
    out.push_str(&insert);
    out.push_str(&markup[at..]);
    Cow::Owned(out)
}
