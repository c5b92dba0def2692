//! Reference record schema
//!
//! One record per reference entry in an article's reference list.

use serde::{Deserialize, Serialize};

/// A single extracted reference
///
/// Every field is optional: markup that lacks a piece degrades to `None`
/// instead of failing the extraction. Unset fields serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Resolved target of the primary citation link
    pub url: Option<String>,
    /// Citation category from the wrapper class (e.g. "web", "book")
    #[serde(rename = "type")]
    pub citation_type: Option<String>,
    /// Link text, or the whole entry text when there is no link
    pub title: Option<String>,
}

impl ReferenceRecord {
    /// True when the reference points somewhere
    pub fn has_url(&self) -> bool {
        self.url.is_some()
    }
}
