//! wikiref: Structured references from Wikipedia articles
//!
//! Commands:
//! - extract-refs: List an article's references (url, type, title)
//! - check-url: Test a URL against the article pattern

pub mod browser;
pub mod check_url;
pub mod error;
pub mod extract;
pub mod extract_refs;
pub mod page;
pub mod record;
pub mod report;

pub use error::{NavigationFailure, PageError};
pub use extract::{extract_references, extract_references_from_html};
pub use page::{document_base, is_article_url, LoadedPage, ARTICLE_URL_PATTERN};
pub use record::ReferenceRecord;
pub use report::{render_table, OutputFormat};
