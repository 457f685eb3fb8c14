//! Transport failure kinds for a single fetch.

use thiserror::Error;

/// Why a fetch produced no usable response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a status of 400 or above.
    #[error("HTTP {status}")]
    Http { status: u32, reason: Option<String> },
    /// Could not establish a connection (refused, DNS failure, proxy unreachable).
    #[error("unable to connect: {0}")]
    Connection(#[source] curl::Error),
    /// No complete response within the request timeout.
    #[error("request timed out: {0}")]
    Timeout(#[source] curl::Error),
    /// Any other transport failure reported by curl.
    #[error("{0}")]
    Network(#[source] curl::Error),
    /// Not an absolute `http`/`https` URL; nothing was sent.
    #[error("unsupported URL {url}: {reason}")]
    UnsupportedUrl { url: String, reason: String },
    /// Received more body bytes than the configured cap.
    #[error("response body exceeded {limit} bytes")]
    BodyTooLarge { limit: u64 },
}

impl FetchError {
    /// Map a curl error onto Connection, Timeout or Network.
    pub fn from_curl(e: curl::Error) -> Self {
        if e.is_couldnt_connect() || e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy()
        {
            return FetchError::Connection(e);
        }
        if e.is_operation_timedout() {
            return FetchError::Timeout(e);
        }
        FetchError::Network(e)
    }
}
