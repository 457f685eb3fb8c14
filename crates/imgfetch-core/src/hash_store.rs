//! In-memory set of fingerprints for everything already stored.
//!
//! Seeded from the output directory at startup, so images saved by earlier
//! runs are recognised as duplicates. Never persisted on its own.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::checksum::{self, Fingerprint};

/// Extensions (lower-case, no dot) of files fingerprinted when seeding.
pub const SEED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

#[derive(Debug, Default)]
pub struct HashStore {
    known: HashSet<Fingerprint>,
}

impl HashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprints every image file directly inside `dir` (no recursion).
    ///
    /// Files that cannot be read are skipped; only failing to list `dir` is an error.
    pub fn initialize(dir: &Path) -> Result<Self> {
        let mut store = Self::new();
        let entries = fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || !is_seedable(&path) {
                continue;
            }
            match checksum::sha256_path(&path) {
                Ok(fp) => store.add(fp),
                Err(e) => tracing::debug!("skipping {}: {:#}", path.display(), e),
            }
        }
        tracing::debug!(count = store.len(), "seeded hash store from {}", dir.display());
        Ok(store)
    }

    pub fn contains(&self, fp: &Fingerprint) -> bool {
        self.known.contains(fp)
    }

    /// Idempotent.
    pub fn add(&mut self, fp: Fingerprint) {
        self.known.insert(fp);
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

/// True if `path` has one of [`SEED_EXTENSIONS`], compared case-insensitively.
pub fn is_seedable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            SEED_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
