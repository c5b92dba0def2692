//! wikiref CLI
//!
//! Structured references from Wikipedia articles.
//! Live pages load in headless Chrome; saved HTML works offline.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use wikiref::check_url::{run_check_url, CheckUrlArgs};
use wikiref::extract_refs::{run_extract_refs, ExtractRefsArgs};

#[derive(Parser)]
#[command(name = "wikiref")]
#[command(author = "RoyalBit Inc.")]
#[command(version)]
#[command(about = "Structured references from Wikipedia articles")]
#[command(long_about = "Extracts url, citation type and title for every entry in an article's reference list.\n\nCommands:\n  extract-refs   List an article's references\n  check-url      Test a URL against https://*.wikipedia.org/wiki/*")]
struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List an article's references (url, type, title)
    ExtractRefs(ExtractRefsArgs),
    /// Check whether a URL is a Wikipedia article URL
    CheckUrl(CheckUrlArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v/-q
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::ExtractRefs(args) => run_extract_refs(args).await,
        Commands::CheckUrl(args) => run_check_url(args).await,
    }
}
