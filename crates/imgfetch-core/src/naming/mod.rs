//! Filename derivation for stored images.
//!
//! Uses the last URL path segment when there is one, otherwise a name built
//! from a short hash of the URL. The chosen name is always sanitized.

mod path;
mod sanitize;

pub use path::final_path_segment;
pub use sanitize::sanitize_filename;

use md5::{Digest, Md5};
use std::path::Path;

use crate::hash_store::is_seedable;

/// Prefix of names synthesized when the URL offers no usable segment.
pub const SYNTHESIZED_PREFIX: &str = "downloaded_image_";

/// Extension (with dot) for an allow-listed image content type.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        "image/bmp" => Some(".bmp"),
        _ => None,
    }
}

/// `downloaded_image_<first 8 hex chars of MD5(url)><ext>`.
pub fn synthesized_filename(url: &str, ext: &str) -> String {
    let digest = hex::encode(Md5::digest(url.as_bytes()));
    format!("{}{}{}", SYNTHESIZED_PREFIX, &digest[..8], ext)
}

/// Derives the filename an image from `url` is saved under.
///
/// A segment whose extension is not an image extension gets the one guessed
/// from the content type appended, so the file is reseeded on the next run and
/// never ends in the `.tmp` staging suffix.
///
/// # Examples
///
/// - `derive_filename("https://example.com/a/b/photo.JPG?x=1", Some("image/jpeg"))` → `"photo.JPG"`
/// - `derive_filename("https://example.com/avatar", Some("image/png"))` → `"avatar.png"`
/// - `derive_filename("https://example.com/", Some("image/png"))` → `"downloaded_image_XXXXXXXX.png"`
pub fn derive_filename(url: &str, content_type: Option<&str>) -> String {
    let ext = content_type.and_then(extension_for_content_type);
    let synthesized = || synthesized_filename(url, ext.unwrap_or(""));

    let candidate = match (final_path_segment(url), ext) {
        (Some(segment), Some(_)) if is_seedable(Path::new(&segment)) => segment,
        (Some(segment), Some(ext)) => format!("{segment}{ext}"),
        _ => synthesized(),
    };

    let sanitized = sanitize_filename(&candidate);
    if is_usable(&sanitized) {
        sanitized
    } else {
        synthesized()
    }
}

/// Image extension and a stem that is more than dots.
fn is_usable(name: &str) -> bool {
    let path = Path::new(name);
    let stem_ok = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| !s.chars().all(|c| c == '.'));
    stem_ok && is_seedable(path)
}
