use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::template::{TemplateKind, TemplateRow};
use crate::uploads::naming::{candidate_suffixes, unique_filename};
use crate::uploads::records::insert_template;

/// A validated upload waiting to be stored.
#[derive(Debug, Clone)]
pub struct TemplateUpload {
    pub original_name: String,
    pub kind: TemplateKind,
    pub contents: Bytes,
}

/// A file published into the upload directory.
///
/// Removed again on drop unless [`StoredUpload::keep`] is called, so a failure between
/// the file write and the metadata insert leaves no orphan behind.
#[must_use = "the file is deleted when this guard is dropped without keep()"]
#[derive(Debug)]
pub struct StoredUpload {
    filename: String,
    path: PathBuf,
    kept: bool,
}

impl StoredUpload {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keep(mut self) {
        self.kept = true;
    }

    /// Removes the file on the blocking pool.
    pub async fn discard(mut self) {
        self.kept = true;
        let path = self.path.clone();
        let result = tokio::task::spawn_blocking(move || std::fs::remove_file(&path)).await;
        match result {
            Ok(Ok(())) => info!("Rolled back upload {}", self.path.display()),
            Ok(Err(e)) => warn!("Failed to remove orphaned upload {}: {e}", self.path.display()),
            Err(e) => warn!("Cleanup of {} did not run: {e}", self.path.display()),
        }
    }
}

// Fallback for a cancelled request; errors go through `discard`.
impl Drop for StoredUpload {
    fn drop(&mut self) {
        if self.kept {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!("Rolled back upload {}", self.path.display()),
            Err(e) => warn!("Failed to remove orphaned upload {}: {e}", self.path.display()),
        }
    }
}

/// Writes `contents` into `dir` under a fresh unique name.
///
/// The bytes are staged in a temp file first and then published with a no-clobber
/// rename, so an existing upload is never overwritten: a taken name just moves on to
/// the next candidate suffix.
pub fn write_unique<R: Rng>(
    dir: &Path,
    original_name: &str,
    kind: TemplateKind,
    date: NaiveDate,
    contents: &[u8],
    rng: &mut R,
) -> io::Result<StoredUpload> {
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;

    for suffix in candidate_suffixes(rng) {
        let filename = unique_filename(original_name, kind, date, &suffix);
        let path = dir.join(&filename);
        match staged.persist_noclobber(&path) {
            Ok(_) => {
                return Ok(StoredUpload {
                    filename,
                    path,
                    kept: false,
                })
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => staged = e.file,
            Err(e) => return Err(e.error),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name left for '{original_name}'"),
    ))
}

/// Stores the file and records it; either both happen or neither does.
pub async fn save_template(
    pool: &SqlitePool,
    upload_dir: &Path,
    upload: TemplateUpload,
) -> Result<TemplateRow, AppError> {
    let now = Utc::now();
    let dir = upload_dir.to_path_buf();
    let TemplateUpload {
        original_name,
        kind,
        contents,
    } = upload;

    let stored = tokio::task::spawn_blocking(move || {
        write_unique(
            &dir,
            &original_name,
            kind,
            now.date_naive(),
            &contents,
            &mut rand::rng(),
        )
    })
    .await
    .map_err(anyhow::Error::from)??;

    let inserted = insert_template(pool, kind, stored.filename(), now).await;
    let template = match inserted {
        Ok(template) => template,
        Err(e) => {
            stored.discard().await;
            return Err(e.into());
        }
    };
    info!("Stored template {template} at {}", stored.path().display());
    stored.keep();

    Ok(template)
}
