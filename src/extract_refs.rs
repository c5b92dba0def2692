//! extract-refs command: List an article's references
//!
//! Loads one article (live, from a saved file, or from stdin), extracts its
//! references once and prints them.

use crate::browser::PageLoader;
use crate::error::PageError;
use crate::extract::extract_references;
use crate::page::{document_base, parse_article_url, parse_url, LoadedPage};
use crate::report::{render, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

#[derive(Args)]
pub struct ExtractRefsArgs {
    /// Saved article HTML file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Load a live article (https://*.wikipedia.org/wiki/*) in headless Chrome
    #[arg(long, conflicts_with_all = ["file", "stdin"])]
    url: Option<String>,

    /// Read article HTML from stdin
    #[arg(long, conflicts_with = "file")]
    stdin: bool,

    /// Page URL that relative links resolve against (file/stdin input)
    #[arg(long, value_name = "URL", conflicts_with = "url")]
    base_url: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Page load timeout in milliseconds
    #[arg(long, env = "WIKIREF_TIMEOUT", default_value = "30000")]
    timeout: u64,

    /// Max table cell width (0 = unlimited)
    #[arg(long, default_value = "60")]
    max_width: usize,
}

/// Run the extract-refs command
pub async fn run_extract_refs(args: ExtractRefsArgs) -> Result<()> {
    let page = load_page(&args).await?;

    let doc = page.document();
    let base = document_base(&doc, page.url.as_ref());
    debug!(base = ?base.as_ref().map(|u| u.as_str()), "Resolved document base");

    let references = extract_references(&doc, base.as_ref());
    let linked = references.iter().filter(|r| r.has_url()).count();
    info!(
        references = references.len(),
        linked,
        "Extracted references"
    );

    let page_url = page.url.as_ref().or(base.as_ref()).map(|u| u.to_string());
    let output = render(&references, page_url, args.format, args.max_width)?;
    println!("{}", output.trim_end());

    Ok(())
}

/// Get the page from --url, --stdin, or FILE
async fn load_page(args: &ExtractRefsArgs) -> Result<LoadedPage> {
    if let Some(raw) = &args.url {
        // Reject non-article URLs before paying for a browser
        let url = parse_article_url(raw)?;
        info!(url = %url, "Loading article");

        let loader = PageLoader::launch().await?;
        let loaded = loader.load(&url, args.timeout).await;
        let closed = loader.close().await;
        return Ok(settle_load(loaded, closed)?);
    }

    let base = args.base_url.as_deref().map(parse_url).transpose()?;

    if args.stdin {
        let mut html = String::new();
        tokio::io::stdin()
            .read_to_string(&mut html)
            .await
            .context("Failed to read stdin")?;
        return Ok(LoadedPage::new(html, base));
    }

    if let Some(file) = &args.file {
        let html = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read file: {}", file.display()))?;
        return Ok(LoadedPage::new(html, base));
    }

    eprintln!("Usage:");
    eprintln!("  wikiref extract-refs <article.html>   Extract from saved article");
    eprintln!("  wikiref extract-refs --url <URL>      Extract from live article");
    eprintln!("  wikiref extract-refs --stdin          Read article HTML from stdin");
    std::process::exit(1);
}

/// The load outcome, whatever happened when Chrome shut down
fn settle_load(
    loaded: Result<LoadedPage, PageError>,
    closed: Result<(), PageError>,
) -> Result<LoadedPage, PageError> {
    if let Err(e) = closed {
        warn!(error = %e, "Failed to close Chrome");
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_failure() -> Result<(), PageError> {
        Err(PageError::Launch("browser already gone".to_string()))
    }

    #[test]
    fn test_settle_load_keeps_page_when_close_fails() {
        let page = LoadedPage::new("<p>ok</p>", None);
        let settled = settle_load(Ok(page), close_failure()).unwrap();
        assert_eq!(settled.html, "<p>ok</p>");
    }

    #[test]
    fn test_settle_load_keeps_navigation_error() {
        let loaded = Err(PageError::Timeout {
            url: "https://en.wikipedia.org/wiki/Rust".to_string(),
            timeout_ms: 100,
        });
        let err = settle_load(loaded, close_failure()).unwrap_err();
        assert!(matches!(err, PageError::Timeout { .. }));
    }
}
