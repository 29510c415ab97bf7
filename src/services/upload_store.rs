use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Suffixed names tried after a collision before giving up.
const MAX_NAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to create upload directory {path}: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("Failed to write upload {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// Flat directory of uploaded files. Files are named `<unix-millis>-<original name>`,
/// or `<unix-millis>-<n>-<original name>` when that name is already taken.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a timestamped name, creating the directory on first use.
    /// Returns the stored path, e.g. `uploads/1718000000000-photo.jpg`.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| UploadError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let stamp = Utc::now().timestamp_millis();
        let (path, mut file) = self.create_unique(stamp, &sanitize_file_name(original_name)).await?;

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;
        if let Err(source) = written {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(UploadError::Write { path, source });
        }

        tracing::info!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(path.to_string_lossy().into_owned())
    }

    /// Create a new file named after `stamp` and `base`, adding a counter when the name is taken
    async fn create_unique(&self, stamp: i64, base: &str) -> Result<(PathBuf, File), UploadError> {
        let mut attempt = 0;
        loop {
            let file_name = if attempt == 0 {
                format!("{stamp}-{base}")
            } else {
                format!("{stamp}-{attempt}-{base}")
            };
            let path = self.dir.join(file_name);

            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                    attempt += 1;
                }
                Err(source) => return Err(UploadError::Write { path, source }),
            }
        }
    }

    /// Best-effort removal of a previously stored file. Paths outside the upload directory are left alone.
    pub async fn remove(&self, stored_path: &str) {
        let path = Path::new(stored_path);
        if path.parent() != Some(self.dir.as_path()) {
            tracing::warn!("Not removing {}: outside upload directory", stored_path);
            return;
        }
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!("Failed to remove upload {}: {}", stored_path, e);
        }
    }
}

/// Keep only the final path component and collapse whitespace runs into `_`
fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned = base.split_whitespace().collect::<Vec<_>>().join("_");
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "upload".to_string()
    } else {
        cleaned
    }
}
