//! Restrict filenames to a portable character set.

/// Longest name kept, leaving room for the `.tmp` staging suffix and a collision suffix.
const MAX_NAME_BYTES: usize = 240;

/// Keeps only alphanumeric characters, `.`, `_` and `-`; everything else is dropped.
///
/// Overlong names are shortened from the stem so the extension survives.
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if kept.len() <= MAX_NAME_BYTES {
        return kept;
    }

    let (stem, ext) = match kept.rfind('.') {
        Some(dot) if dot > 0 && kept.len() - dot <= 16 => kept.split_at(dot),
        _ => (kept.as_str(), ""),
    };
    let mut take = MAX_NAME_BYTES.saturating_sub(ext.len());
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}{}", &stem[..take], ext)
}
