//! CLI for the imgfetch image downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgfetch_core::config::{self, ImgfetchConfig};
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_fetch};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "imgfetch: download images, skipping ones already stored", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/imgfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download images into the output directory.
    Fetch {
        /// Image URLs; an argument may hold several comma-separated URLs.
        /// Prompts on stdin when none are given.
        urls: Vec<String>,

        /// Directory to save images into (created if missing).
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Request timeout in seconds.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Abort a download once it has received more than N bytes.
        #[arg(long, value_name = "N")]
        max_body_bytes: Option<u64>,
    },

    /// Print the SHA-256 fingerprint used for deduplication of a file.
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                urls,
                output_dir,
                timeout,
                max_body_bytes,
            } => {
                let cfg = apply_overrides(cfg, output_dir, timeout, max_body_bytes);
                run_fetch(&cfg, &urls)?;
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}

/// Flags given on the command line win over the config file.
pub(crate) fn apply_overrides(
    mut cfg: ImgfetchConfig,
    output_dir: Option<PathBuf>,
    timeout: Option<u64>,
    max_body_bytes: Option<u64>,
) -> ImgfetchConfig {
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    if let Some(secs) = timeout {
        cfg.timeout_secs = secs;
    }
    if max_body_bytes.is_some() {
        cfg.max_body_bytes = max_body_bytes;
    }
    cfg
}

#[cfg(test)]
mod tests;
