//! One URL end to end: fetch, validate, stage, fingerprint, keep or drop.
//!
//! Every failure is turned into an [`Outcome`]; nothing escapes to abort a batch.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::checksum;
use crate::config::ImgfetchConfig;
use crate::fetch::Fetcher;
use crate::hash_store::HashStore;
use crate::naming;
use crate::outcome::Outcome;
use crate::staging::{self, StagedFile};
use crate::validate::ContentValidator;

/// Saves images into one output directory.
#[derive(Debug, Clone)]
pub struct ImagePersister {
    fetcher: Fetcher,
    validator: ContentValidator,
    output_dir: PathBuf,
}

impl ImagePersister {
    /// `output_dir` must already exist.
    pub fn new(fetcher: Fetcher, validator: ContentValidator, output_dir: &Path) -> Self {
        Self {
            fetcher,
            validator,
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn from_config(cfg: &ImgfetchConfig) -> Self {
        Self::new(
            Fetcher::from_config(cfg),
            ContentValidator::new(cfg.max_declared_bytes),
            &cfg.output_dir,
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Processes `url`, recording the fingerprint of a newly saved image in `store`.
    pub fn persist(&self, url: &str, store: &mut HashStore) -> Outcome {
        match self.try_persist(url, store) {
            Ok(outcome) => {
                tracing::debug!(url, saved = outcome.is_saved(), "{}", outcome);
                outcome
            }
            Err(e) => {
                tracing::warn!(url, "unexpected failure: {:#}", e);
                Outcome::Unexpected {
                    url: url.to_string(),
                    detail: format!("{:#}", e),
                }
            }
        }
    }

    fn try_persist(&self, url: &str, store: &mut HashStore) -> Result<Outcome> {
        let response = match self.fetcher.fetch(url, |meta| self.validator.accepts(meta)) {
            Ok(r) => r,
            Err(e) => return Ok(Outcome::from_fetch_error(url, e)),
        };

        if let Err(rejection) = self.validator.check(&response.metadata) {
            return Ok(Outcome::from_rejection(url, rejection));
        }
        if !response.complete {
            bail!("transfer stopped before the body was received");
        }

        let filename = naming::derive_filename(url, response.metadata.content_type.as_deref());
        let final_path = self.output_dir.join(&filename);

        let staged = StagedFile::write(&final_path, &response.body)?;
        let fingerprint = checksum::sha256_path(staged.path())?;

        if store.contains(&fingerprint) {
            staged.discard()?;
            return Ok(Outcome::Duplicate {
                url: url.to_string(),
            });
        }

        let dest = staging::vacant_path(&final_path);
        if dest != final_path {
            tracing::debug!(
                "{} exists, saving as {}",
                final_path.display(),
                dest.display()
            );
        }
        staged.commit(&dest)?;
        store.add(fingerprint);
        tracing::info!(url, fingerprint = %fingerprint, "saved {}", dest.display());

        let filename = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(filename);
        Ok(Outcome::Saved {
            url: url.to_string(),
            filename,
            path: dest,
        })
    }
}
