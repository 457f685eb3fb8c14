//! Blocking HTTP GET for a single image URL.
//!
//! Uses the curl crate (libcurl). The final response's headers are handed to
//! an accept gate when its first body chunk arrives, before anything is
//! stored, so a refused response costs little more than its header block.

mod error;
mod parse;

pub use error::FetchError;

use crate::config::ImgfetchConfig;
use std::cell::RefCell;
use std::time::Duration;

/// Identification sent with every request.
pub const USER_AGENT: &str = concat!("imgfetch/", env!("CARGO_PKG_VERSION"));

/// Default total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Headers the validator inspects, as declared by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
    /// Raw `Content-Type` value, if present.
    pub content_type: Option<String>,
    /// Raw `Content-Length` value, if present. Kept unparsed so a malformed value can be refused.
    pub content_length: Option<String>,
}

/// A response whose status was below 400.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u32,
    pub metadata: ResponseMetadata,
    pub body: Vec<u8>,
    /// False when the accept gate stopped the transfer; `body` is then empty.
    pub complete: bool,
}

/// Performs GET requests with a fixed User-Agent and a bounded timeout.
#[derive(Debug, Clone)]
pub struct Fetcher {
    timeout: Duration,
    max_body_bytes: Option<u64>,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: None,
        }
    }
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_body_bytes: None,
        }
    }

    pub fn from_config(cfg: &ImgfetchConfig) -> Self {
        Self::new(Duration::from_secs(cfg.timeout_secs)).with_body_cap(cfg.max_body_bytes)
    }

    /// Abort transfers that deliver more than `limit` body bytes.
    pub fn with_body_cap(mut self, limit: Option<u64>) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GETs `url`, following redirects.
    ///
    /// `accept` sees the final response's metadata just before its first body
    /// byte is stored; returning false stops the transfer and yields an
    /// incomplete response. Statuses of 400 and above stop the transfer too and
    /// become [`FetchError::Http`], which wins over any transport error that
    /// follows. Only `http` and `https` URLs are fetched.
    pub fn fetch<F>(&self, url: &str, mut accept: F) -> Result<FetchedResponse, FetchError>
    where
        F: FnMut(&ResponseMetadata) -> bool,
    {
        check_scheme(url)?;

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(FetchError::from_curl)?;
        easy.get(true).map_err(FetchError::from_curl)?;
        easy.useragent(USER_AGENT).map_err(FetchError::from_curl)?;
        easy.follow_location(true).map_err(FetchError::from_curl)?;
        easy.max_redirections(10).map_err(FetchError::from_curl)?;
        easy.timeout(self.timeout).map_err(FetchError::from_curl)?;

        let limit = self.max_body_bytes;
        // Shared by both callbacks: headers fill it, the first body chunk reads it.
        let lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let mut body: Vec<u8> = Vec::new();
        let mut gated = false;
        let mut gate_closed = false;
        let mut overflowed = false;

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    let raw = String::from_utf8_lossy(data);
                    let line = raw.trim_end();
                    let mut lines = lines.borrow_mut();
                    // Proxy CONNECT replies, 1xx and redirect hops each start a fresh block.
                    if line.starts_with("HTTP/") {
                        lines.clear();
                    }
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                    true
                })
                .map_err(FetchError::from_curl)?;
            transfer
                .write_function(|data| {
                    if !gated {
                        gated = true;
                        let head = parse::parse_head(&lines.borrow());
                        if head.status >= 400 || !accept(&head.metadata) {
                            gate_closed = true;
                            return Ok(0); // abort transfer
                        }
                    }
                    if let Some(limit) = limit {
                        if (body.len() + data.len()) as u64 > limit {
                            overflowed = true;
                            return Ok(0); // abort transfer
                        }
                    }
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(FetchError::from_curl)?;
            transfer.perform()
        };

        let status = easy.response_code().map_err(FetchError::from_curl)?;
        let head = parse::parse_head(&lines.into_inner());

        if status >= 400 {
            return Err(FetchError::Http {
                status,
                reason: head.reason,
            });
        }

        if let Err(e) = performed {
            if overflowed {
                return Err(FetchError::BodyTooLarge {
                    limit: limit.unwrap_or_default(),
                });
            }
            if !gate_closed {
                return Err(FetchError::from_curl(e));
            }
            tracing::debug!(url, status, "transfer stopped at header gate");
        }

        Ok(FetchedResponse {
            status,
            metadata: head.metadata,
            body,
            complete: !gate_closed,
        })
    }
}

/// Refuses anything but `http`/`https` before curl sees the URL.
fn check_scheme(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::UnsupportedUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::UnsupportedUrl {
            url: url.to_string(),
            reason: format!("scheme {other:?} is not http or https"),
        }),
    }
}
