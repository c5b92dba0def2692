//! check-url command: Does a URL trigger extraction?
//!
//! Prints one compact JSON line `{"url","matches","pattern"}`.

use crate::page::{is_article_url, parse_url, ARTICLE_URL_PATTERN};
use anyhow::Result;
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct CheckUrlArgs {
    /// URL to test against the article pattern
    #[arg(value_name = "URL")]
    url: String,
}

#[derive(Debug, Serialize)]
pub struct CheckUrlOutput {
    pub url: String,
    pub matches: bool,
    pub pattern: &'static str,
}

/// Run the check-url command; exits 1 when the URL does not match
pub async fn run_check_url(args: CheckUrlArgs) -> Result<()> {
    let url = parse_url(&args.url)?;
    let output = CheckUrlOutput {
        url: url.to_string(),
        matches: is_article_url(&url),
        pattern: ARTICLE_URL_PATTERN,
    };

    println!("{}", serde_json::to_string(&output)?);

    if !output.matches {
        std::process::exit(1);
    }
    Ok(())
}
