//! `imgfetch fetch [URLS]...` – download, dedup and store images.

use anyhow::{Context, Result};
use imgfetch_core::config::ImgfetchConfig;
use imgfetch_core::{HashStore, ImagePersister};
use std::fs;
use std::io::{self, BufRead, Write};

/// Splits comma-separated URL lists, trimming blanks away.
pub(crate) fn split_urls<S: AsRef<str>>(inputs: &[S]) -> Vec<String> {
    inputs
        .iter()
        .flat_map(|s| s.as_ref().split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn prompt_for_urls() -> Result<Vec<String>> {
    print!("Please enter image URL(s) (comma-separated for multiple): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read URLs from stdin")?;
    Ok(split_urls(&[line]))
}

pub fn run_fetch(cfg: &ImgfetchConfig, args: &[String]) -> Result<()> {
    println!("imgfetch: collecting images into {}\n", cfg.output_dir.display());

    let urls = if args.is_empty() {
        prompt_for_urls()?
    } else {
        split_urls(args)
    };
    if urls.is_empty() {
        println!("✗ No valid URLs provided.");
        return Ok(());
    }

    fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("create output dir {}", cfg.output_dir.display()))?;
    let mut store = HashStore::initialize(&cfg.output_dir)?;
    tracing::info!(
        known = store.len(),
        urls = urls.len(),
        "starting batch in {}",
        cfg.output_dir.display()
    );

    let persister = ImagePersister::from_config(cfg);
    let mut saved = 0usize;
    for url in &urls {
        println!("\nProcessing {}...", url);
        let outcome = persister.persist(url, &mut store);
        if outcome.is_saved() {
            saved += 1;
        }
        println!("{}", outcome);
    }

    println!(
        "\nDone: {} saved, {} skipped or failed.",
        saved,
        urls.len() - saved
    );
    Ok(())
}
