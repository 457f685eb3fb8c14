//! Checksum command: print the dedup fingerprint of a file.

use anyhow::Result;
use imgfetch_core::checksum;
use std::path::Path;

pub fn run_checksum(path: &Path) -> Result<()> {
    let fingerprint = checksum::sha256_path(path)?;
    println!("{}  {}", fingerprint, path.display());
    Ok(())
}
