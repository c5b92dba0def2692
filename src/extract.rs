//! Reference extraction from article HTML
//!
//! Walks `.mw-references-wrap .reference-text` entries and maps each one to
//! a [`ReferenceRecord`]. Read-only; never fails.

use crate::record::ReferenceRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

const REFERENCE_TEXT_SELECTOR_STR: &str = ".mw-references-wrap .reference-text";
const CITATION_SELECTOR_STR: &str = "cite";
const EXTERNAL_LINK_SELECTOR_STR: &str = "a.external.text";
const ANY_LINK_SELECTOR_STR: &str = "a";

// ASCII word characters, same as `\w` in a browser regex
const CITATION_TYPE_PATTERN: &str = r"citation ([A-Za-z0-9_]+)";

static REFERENCE_TEXT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(REFERENCE_TEXT_SELECTOR_STR).expect("reference-text selector is valid")
});
static CITATION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CITATION_SELECTOR_STR).expect("citation selector is valid")
});
static EXTERNAL_LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(EXTERNAL_LINK_SELECTOR_STR).expect("external link selector is valid")
});
static ANY_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(ANY_LINK_SELECTOR_STR).expect("link selector is valid"));
static CITATION_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CITATION_TYPE_PATTERN).expect("citation type regex is valid"));

/// Extract one record per reference entry, in document order
///
/// `base` resolves relative link targets; pass the page's base URL (see
/// [`crate::page::document_base`]). Without it, relative hrefs are kept as
/// written.
pub fn extract_references(doc: &Html, base: Option<&Url>) -> Vec<ReferenceRecord> {
    doc.select(&REFERENCE_TEXT_SELECTOR)
        .map(|entry| extract_reference(entry, base))
        .collect()
}

/// Parse `html` and extract its references
pub fn extract_references_from_html(html: &str, base: Option<&Url>) -> Vec<ReferenceRecord> {
    let doc = Html::parse_document(html);
    extract_references(&doc, base)
}

fn extract_reference(entry: ElementRef<'_>, base: Option<&Url>) -> ReferenceRecord {
    let cite = entry.select(&CITATION_SELECTOR).next();

    // Structured citations only count their external link
    let link = match cite {
        Some(cite) => cite.select(&EXTERNAL_LINK_SELECTOR).next(),
        None => entry.select(&ANY_LINK_SELECTOR).next(),
    };

    let (url, title) = match link {
        Some(link) => {
            let url = link
                .value()
                .attr("href")
                .map(|href| resolve_href(href, base));
            let text = visible_text(link);
            (url, Some(text).filter(|t| !t.is_empty()))
        }
        None => (None, Some(visible_text(entry))),
    };

    let citation_type = cite
        .and_then(|cite| cite.value().attr("class"))
        .and_then(citation_type);

    ReferenceRecord {
        url,
        citation_type,
        title,
    }
}

/// Category token from a class list like `"citation web cs1"`
pub fn citation_type(class: &str) -> Option<String> {
    CITATION_TYPE_RE
        .captures(class)
        .map(|cap| cap[1].to_string())
}

/// Resolve an href the way a browser reports `a.href`
fn resolve_href(href: &str, base: Option<&Url>) -> String {
    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };
    match resolved {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Concatenated text of `el`, skipping inline `<style>` and `<script>`
fn visible_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_visible_text(el, &mut out);
    out
}

fn push_visible_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !matches!(child_el.value().name(), "style" | "script") {
                push_visible_text(child_el, out);
            }
        }
    }
}
