//! Filename hint from the URL path.

/// Returns the final segment of the URL path, without query or fragment.
///
/// `None` when the path is empty or ends in `/`. Input that is not an
/// absolute URL is split by hand so a scheme-less address still yields a hint.
pub fn final_path_segment(url: &str) -> Option<String> {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}
