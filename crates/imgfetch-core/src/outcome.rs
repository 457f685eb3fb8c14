//! Per-URL result and its one-message rendering.

use std::fmt;
use std::path::PathBuf;

use crate::fetch::FetchError;
use crate::validate::Rejection;

/// What happened to one URL. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved {
        url: String,
        filename: String,
        path: PathBuf,
    },
    Duplicate {
        url: String,
    },
    InvalidContentType {
        url: String,
        declared: Option<String>,
    },
    /// `declared` is the refused `Content-Length`; `None` when the body cap tripped instead.
    TooLarge {
        url: String,
        declared: Option<String>,
        limit: u64,
    },
    Http {
        url: String,
        status: u32,
        reason: Option<String>,
    },
    Connection {
        url: String,
        detail: String,
    },
    Timeout {
        url: String,
    },
    Network {
        url: String,
        detail: String,
    },
    Unexpected {
        url: String,
        detail: String,
    },
}

impl Outcome {
    pub fn url(&self) -> &str {
        match self {
            Outcome::Saved { url, .. }
            | Outcome::Duplicate { url }
            | Outcome::InvalidContentType { url, .. }
            | Outcome::TooLarge { url, .. }
            | Outcome::Http { url, .. }
            | Outcome::Connection { url, .. }
            | Outcome::Timeout { url }
            | Outcome::Network { url, .. }
            | Outcome::Unexpected { url, .. } => url,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved { .. })
    }

    pub(crate) fn from_fetch_error(url: &str, err: FetchError) -> Self {
        let url = url.to_string();
        match err {
            FetchError::Http { status, reason } => Outcome::Http {
                url,
                status,
                reason,
            },
            FetchError::Connection(e) => Outcome::Connection {
                url,
                detail: e.to_string(),
            },
            FetchError::Timeout(_) => Outcome::Timeout { url },
            FetchError::Network(e) => Outcome::Network {
                url,
                detail: e.to_string(),
            },
            e @ FetchError::UnsupportedUrl { .. } => Outcome::Network {
                detail: e.to_string(),
                url,
            },
            FetchError::BodyTooLarge { limit } => Outcome::TooLarge {
                url,
                declared: None,
                limit,
            },
        }
    }

    pub(crate) fn from_rejection(url: &str, rejection: Rejection) -> Self {
        let url = url.to_string();
        match rejection {
            Rejection::InvalidContentType { declared } => {
                Outcome::InvalidContentType { url, declared }
            }
            Rejection::TooLarge { declared, limit } => Outcome::TooLarge {
                url,
                declared: Some(declared),
                limit,
            },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Saved { filename, path, .. } => write!(
                f,
                "✓ Successfully fetched: {}\n✓ Image saved to {}",
                filename,
                path.display()
            ),
            Outcome::Duplicate { url } => {
                write!(f, "✗ Skipped {}: Duplicate image detected", url)
            }
            Outcome::InvalidContentType { url, declared } => write!(
                f,
                "✗ Invalid content type for {}: {}",
                url,
                declared.as_deref().unwrap_or("None")
            ),
            Outcome::TooLarge {
                url,
                declared: Some(declared),
                ..
            } => write!(f, "✗ File too large for {}: {} bytes", url, declared),
            Outcome::TooLarge {
                url,
                declared: None,
                limit,
            } => write!(f, "✗ File too large for {}: exceeded {} bytes", url, limit),
            Outcome::Http {
                url,
                status,
                reason: Some(reason),
            } => write!(f, "✗ HTTP error for {}: {} {}", url, status, reason),
            Outcome::Http {
                url,
                status,
                reason: None,
            } => write!(f, "✗ HTTP error for {}: {}", url, status),
            Outcome::Connection { url, .. } => {
                write!(f, "✗ Connection error for {}: Unable to connect", url)
            }
            Outcome::Timeout { url } => {
                write!(f, "✗ Timeout error for {}: Request timed out", url)
            }
            Outcome::Network { url, detail } => {
                write!(f, "✗ Network error for {}: {}", url, detail)
            }
            Outcome::Unexpected { url, detail } => {
                write!(f, "✗ Unexpected error for {}: {}", url, detail)
            }
        }
    }
}
