//! Article pages: the URL trigger, the loaded page, and its base URL

use crate::error::PageError;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Pages the extractor is meant to run on
pub const ARTICLE_URL_PATTERN: &str = "https://*.wikipedia.org/wiki/*";

const ARTICLE_HOST: &str = "wikipedia.org";
const ARTICLE_PATH_PREFIX: &str = "/wiki/";

static BASE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("base[href]").expect("base selector is valid"));
static CANONICAL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel="canonical"][href]"#).expect("canonical selector is valid")
});

/// Whether `url` matches [`ARTICLE_URL_PATTERN`]
///
/// `*.wikipedia.org` covers the bare domain and every subdomain
/// (`en.`, `de.`, `en.m.`).
pub fn is_article_url(url: &Url) -> bool {
    if url.scheme() != "https" {
        return false;
    }
    let host_ok = match url.host_str() {
        Some(host) => {
            host == ARTICLE_HOST
                || host
                    .strip_suffix(ARTICLE_HOST)
                    .is_some_and(|prefix| prefix.len() > 1 && prefix.ends_with('.'))
        }
        None => false,
    };
    host_ok && url.path().starts_with(ARTICLE_PATH_PREFIX)
}

/// Parse `raw` and require it to be an article URL
pub fn parse_article_url(raw: &str) -> Result<Url, PageError> {
    let url = Url::parse(raw.trim()).map_err(|e| PageError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !is_article_url(&url) {
        return Err(PageError::NotArticle {
            url: url.to_string(),
            pattern: ARTICLE_URL_PATTERN,
        });
    }

    Ok(url)
}

/// Parse any absolute URL (used for an explicit base)
pub fn parse_url(raw: &str) -> Result<Url, PageError> {
    Url::parse(raw.trim()).map_err(|e| PageError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// A page as handed over by whatever loaded it
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Where the page lives, when known
    pub url: Option<Url>,
    pub html: String,
}

impl LoadedPage {
    pub fn new(html: impl Into<String>, url: Option<Url>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }

    /// Parse the HTML into a queryable document
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// Base URL that relative links in `doc` resolve against
///
/// The document URL is the page URL, or the canonical link for pages saved
/// to disk. A `<base href>` wins, resolved against the document URL when
/// relative; otherwise the document URL itself.
pub fn document_base(doc: &Html, page_url: Option<&Url>) -> Option<Url> {
    let document_url = page_url.cloned().or_else(|| canonical_url(doc));

    let base_href = doc
        .select(&BASE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"));

    if let Some(href) = base_href {
        let resolved = match &document_url {
            Some(doc_url) => doc_url.join(href).ok(),
            None => Url::parse(href).ok(),
        };
        if resolved.is_some() {
            return resolved;
        }
    }

    document_url
}

fn canonical_url(doc: &Html) -> Option<Url> {
    doc.select(&CANONICAL_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| Url::parse(href).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_article_url_matches() {
        assert!(is_article_url(&url("https://en.wikipedia.org/wiki/Rust")));
        assert!(is_article_url(&url(
            "https://de.wikipedia.org/wiki/Rust_(Programmiersprache)"
        )));
        assert!(is_article_url(&url("https://en.m.wikipedia.org/wiki/Rust")));
        assert!(is_article_url(&url("https://wikipedia.org/wiki/Rust")));
        assert!(is_article_url(&url("https://en.wikipedia.org/wiki/")));
    }

    #[test]
    fn test_article_url_rejects() {
        assert!(!is_article_url(&url("http://en.wikipedia.org/wiki/Rust")));
        assert!(!is_article_url(&url("https://en.wikipedia.org/w/index.php?title=Rust")));
        assert!(!is_article_url(&url("https://notwikipedia.org/wiki/Rust")));
        assert!(!is_article_url(&url("https://evil.com/.wikipedia.org/wiki/Rust")));
        assert!(!is_article_url(&url("https://en.wikipedia.org.evil.com/wiki/Rust")));
    }

    #[test]
    fn test_parse_article_url_errors() {
        assert!(matches!(
            parse_article_url("not a url"),
            Err(PageError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_article_url("https://example.com/wiki/Rust"),
            Err(PageError::NotArticle { .. })
        ));
        assert!(parse_article_url(" https://en.wikipedia.org/wiki/Rust ").is_ok());
    }

    #[test]
    fn test_document_base_prefers_base_tag() {
        let doc = Html::parse_document(
            r#"<html><head><base href="/w/"></head><body></body></html>"#,
        );
        let page = url("https://en.wikipedia.org/wiki/Rust");
        let base = document_base(&doc, Some(&page)).unwrap();
        assert_eq!(base.as_str(), "https://en.wikipedia.org/w/");
    }

    #[test]
    fn test_document_base_falls_back_to_page_url() {
        let doc = Html::parse_document("<p>no head</p>");
        let page = url("https://en.wikipedia.org/wiki/Rust");
        assert_eq!(document_base(&doc, Some(&page)), Some(page.clone()));
    }

    #[test]
    fn test_document_base_uses_canonical_without_page_url() {
        let doc = Html::parse_document(
            r#"<html><head><link rel="canonical" href="https://en.wikipedia.org/wiki/Rust"></head></html>"#,
        );
        let base = document_base(&doc, None).unwrap();
        assert_eq!(base.as_str(), "https://en.wikipedia.org/wiki/Rust");

        let bare = Html::parse_document("<p>nothing</p>");
        assert_eq!(document_base(&bare, None), None);
    }

    #[test]
    fn test_relative_base_joins_canonical() {
        let doc = Html::parse_document(
            r#"<html><head><base href="/w/"><link rel="canonical" href="https://ja.wikipedia.org/wiki/Tokyo"></head></html>"#,
        );
        let base = document_base(&doc, None).unwrap();
        assert_eq!(base.as_str(), "https://ja.wikipedia.org/w/");

        // Nothing to resolve a relative base against
        let orphan = Html::parse_document(r#"<html><head><base href="/w/"></head></html>"#);
        assert_eq!(document_base(&orphan, None), None);
    }
}
