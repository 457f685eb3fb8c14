//! Parse HTTP response header lines into a status and ResponseMetadata.

use super::ResponseMetadata;

/// Status line plus the headers the validator cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHead {
    pub status: u32,
    pub reason: Option<String>,
    pub metadata: ResponseMetadata,
}

/// Parse the header lines of a single response (status line first).
pub(crate) fn parse_head(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            let (status, reason) = parse_status_line(line);
            head.status = status;
            head.reason = reason;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                head.metadata.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                head.metadata.content_length = Some(value.to_string());
            }
        }
    }

    head
}

/// `HTTP/1.1 404 Not Found` → (404, Some("Not Found")). HTTP/2 lines carry no reason.
fn parse_status_line(line: &str) -> (u32, Option<String>) {
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next();
    let status = parts
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let reason = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    (status, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_image_response() {
        let head = parse_head(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Type: image/png",
            "Content-Length: 12345",
        ]));
        assert_eq!(head.status, 200);
        assert_eq!(head.reason.as_deref(), Some("OK"));
        assert_eq!(head.metadata.content_type.as_deref(), Some("image/png"));
        assert_eq!(head.metadata.content_length.as_deref(), Some("12345"));
    }

    #[test]
    fn header_names_case_insensitive_and_raw_values_kept() {
        let head = parse_head(&lines(&[
            "HTTP/1.1 200 OK",
            "content-type: IMAGE/JPEG",
            "CONTENT-LENGTH: not-a-number",
        ]));
        assert_eq!(head.metadata.content_type.as_deref(), Some("IMAGE/JPEG"));
        assert_eq!(
            head.metadata.content_length.as_deref(),
            Some("not-a-number")
        );
    }

    #[test]
    fn missing_headers_are_none() {
        let head = parse_head(&lines(&["HTTP/1.1 204 No Content"]));
        assert_eq!(head.status, 204);
        assert!(head.metadata.content_type.is_none());
        assert!(head.metadata.content_length.is_none());
    }

    #[test]
    fn http2_status_line_without_reason() {
        let head = parse_head(&lines(&["HTTP/2 404", "content-type: text/html"]));
        assert_eq!(head.status, 404);
        assert!(head.reason.is_none());
    }
}
