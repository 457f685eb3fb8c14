//! Staged writes and atomic promotion.
//!
//! A body is written to `<final>.tmp`, fingerprinted, then either renamed to
//! its final name or deleted. An unresolved staged file is removed on drop,
//! so no `.tmp` file outlives the request that created it.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix of staged files.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path for the staged file: appends `.tmp` to the final path (e.g. `cat.png` → `cat.png.tmp`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// First of `name.ext`, `name-1.ext`, `name-2.ext`, ... that does not exist yet.
pub fn vacant_path(final_path: &Path) -> PathBuf {
    if !final_path.exists() {
        return final_path.to_path_buf();
    }
    let stem = final_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = final_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let mut n = 1u32;
    loop {
        let candidate = final_path.with_file_name(format!("{}-{}{}", stem, n, ext));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn create_exclusive(final_path: &Path) -> Result<(PathBuf, File)> {
    let mut n = 0u32;
    loop {
        let path = if n == 0 {
            temp_path(final_path)
        } else {
            let mut o = final_path.as_os_str().to_owned();
            o.push(format!(".{}{}", n, TEMP_SUFFIX));
            PathBuf::from(o)
        };
        match File::options().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to create staging file: {}", path.display())
                })
            }
        }
    }
}

/// Bytes on disk under a temporary name, awaiting a keep-or-drop decision.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    resolved: bool,
}

impl StagedFile {
    /// Write `bytes` to a staging file next to `final_path`.
    ///
    /// Normally `temp_path(final_path)`. The file is created exclusively, so a
    /// file already there is never truncated; `<final>.1.tmp`, `<final>.2.tmp`,
    /// ... are tried instead.
    pub fn write(final_path: &Path, bytes: &[u8]) -> Result<Self> {
        let (path, mut file) = create_exclusive(final_path)?;
        let staged = StagedFile {
            path,
            resolved: false,
        };
        file.write_all(bytes)
            .with_context(|| format!("failed to write staging file: {}", staged.path.display()))?;
        file.sync_all()
            .with_context(|| format!("failed to sync staging file: {}", staged.path.display()))?;
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename into place (no copy).
    pub fn commit(mut self, dest: &Path) -> Result<()> {
        fs::rename(&self.path, dest).with_context(|| {
            format!(
                "failed to rename {} to {}",
                self.path.display(),
                dest.display()
            )
        })?;
        self.resolved = true;
        Ok(())
    }

    pub fn discard(mut self) -> Result<()> {
        fs::remove_file(&self.path)
            .with_context(|| format!("failed to remove {}", self.path.display()))?;
        self.resolved = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.resolved {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("could not remove staging file {}: {}", self.path.display(), e);
            }
        }
    }
}
