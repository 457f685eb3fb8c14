//! Header policy checks run before any body byte is stored.
//!
//! Both checks look only at what the server declared; they never see the body.

use crate::fetch::ResponseMetadata;

/// Largest declared `Content-Length` accepted by default (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Content types accepted as images, compared against the lower-cased header value.
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
];

/// True iff the declared type, lower-cased, is exactly one of [`ALLOWED_CONTENT_TYPES`].
///
/// Parameters such as `; charset=...` are not stripped, so they cause a rejection.
pub fn is_acceptable_type(declared: Option<&str>) -> bool {
    let Some(declared) = declared else {
        return false;
    };
    let lowered = declared.to_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&lowered.as_str())
}

/// Checks a declared `Content-Length` against `max`.
///
/// A missing (or empty) header passes. A value that is not a non-negative
/// integer fails, since it cannot be trusted.
pub fn is_within_size_limit(declared: Option<&str>, max: u64) -> bool {
    match declared.map(str::trim) {
        None | Some("") => true,
        Some(value) => match value.parse::<u64>() {
            Ok(len) => len <= max,
            Err(_) => false,
        },
    }
}

/// Why a response was refused at the header stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    InvalidContentType { declared: Option<String> },
    TooLarge { declared: String, limit: u64 },
}

/// Header policy with a configurable size ceiling.
#[derive(Debug, Clone, Copy)]
pub struct ContentValidator {
    pub max_bytes: u64,
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl ContentValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Type check first, then size.
    pub fn check(&self, meta: &ResponseMetadata) -> Result<(), Rejection> {
        if !is_acceptable_type(meta.content_type.as_deref()) {
            return Err(Rejection::InvalidContentType {
                declared: meta.content_type.clone(),
            });
        }
        if !is_within_size_limit(meta.content_length.as_deref(), self.max_bytes) {
            return Err(Rejection::TooLarge {
                declared: meta.content_length.clone().unwrap_or_default(),
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    pub fn accepts(&self, meta: &ResponseMetadata) -> bool {
        self.check(meta).is_ok()
    }
}
