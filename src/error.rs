//! Error types for obtaining an article page

use std::fmt;
use thiserror::Error;

/// Errors that can occur while locating or loading a page.
///
/// Extraction itself never fails; these only cover getting the HTML.
#[derive(Debug, Error)]
pub enum PageError {
    /// URL does not parse
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// URL parses but is outside the article pattern
    #[error("not a Wikipedia article URL: {url} (expected {pattern})")]
    NotArticle { url: String, pattern: &'static str },

    /// Chrome could not be configured or started
    #[error("failed to launch Chrome: {0}. Is Chrome/Chromium installed?")]
    Launch(String),

    /// Navigation reached the browser but failed
    #[error("failed to load {url}: {kind} ({detail})")]
    Navigation {
        url: String,
        kind: NavigationFailure,
        detail: String,
    },

    /// Navigation did not finish in time
    #[error("timed out after {timeout_ms}ms loading {url}")]
    Timeout { url: String, timeout_ms: u64 },

    /// Any other CDP failure
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
}

/// Coarse classification of a failed navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationFailure {
    DnsFailed,
    ConnectionRefused,
    TimedOut,
    Ssl,
    Network,
}

impl NavigationFailure {
    /// Classify a Chrome network error message
    pub fn classify(error: &str) -> Self {
        if error.contains("ERR_NAME_NOT_RESOLVED") {
            Self::DnsFailed
        } else if error.contains("ERR_CONNECTION_REFUSED") {
            Self::ConnectionRefused
        } else if error.contains("ERR_CONNECTION_TIMED_OUT") {
            Self::TimedOut
        } else if error.contains("ERR_CERT") || error.contains("SSL") {
            Self::Ssl
        } else {
            Self::Network
        }
    }
}

impl fmt::Display for NavigationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DnsFailed => write!(f, "DNS_FAILED"),
            Self::ConnectionRefused => write!(f, "CONNECTION_REFUSED"),
            Self::TimedOut => write!(f, "TIMEOUT"),
            Self::Ssl => write!(f, "SSL_ERROR"),
            Self::Network => write!(f, "NETWORK_ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_navigation_failure() {
        assert_eq!(
            NavigationFailure::classify("net::ERR_NAME_NOT_RESOLVED"),
            NavigationFailure::DnsFailed
        );
        assert_eq!(
            NavigationFailure::classify("ERR_CONNECTION_REFUSED"),
            NavigationFailure::ConnectionRefused
        );
        assert_eq!(
            NavigationFailure::classify("net::ERR_CERT_DATE_INVALID"),
            NavigationFailure::Ssl
        );
        assert_eq!(
            NavigationFailure::classify("random error"),
            NavigationFailure::Network
        );
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(NavigationFailure::DnsFailed.to_string(), "DNS_FAILED");
        assert_eq!(NavigationFailure::TimedOut.to_string(), "TIMEOUT");
        assert_eq!(NavigationFailure::Network.to_string(), "NETWORK_ERROR");
    }

    #[test]
    fn test_not_article_message() {
        let err = PageError::NotArticle {
            url: "https://example.com/".to_string(),
            pattern: "https://*.wikipedia.org/wiki/*",
        };
        assert!(err.to_string().contains("not a Wikipedia article URL"));
    }
}
