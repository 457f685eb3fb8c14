#![allow(dead_code)]

pub mod image_server;

use std::path::Path;

/// Any `*.tmp` file left directly in `dir`.
pub fn leftover_tmp_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect()
}

/// Number of regular files directly in `dir`.
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|e| e.path().is_file())
        .count()
}

/// Bytes that look enough like a PNG for tests; the pipeline never decodes them.
pub fn fake_png(seed: u8) -> Vec<u8> {
    let mut body = b"\x89PNG\r\n\x1a\n".to_vec();
    body.extend((0..256u32).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)));
    body
}
