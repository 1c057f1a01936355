// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! File-backed storage for uploaded originals and removal results
//!
//! Every record is two files under `images/`: the encoded image and a JSON
//! metadata document naming its format, so lookups never guess extensions.
//! The metadata file is written last and its presence marks a complete
//! record. Scratch files for masks live under `scratch/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::vision::{ImageInfo, SupportedFormat};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{kind} image '{id}' not found")]
    NotFound { kind: ImageKind, id: String },

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt metadata for '{id}': {source}")]
    Metadata {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Original,
    Result,
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Original => write!(f, "original"),
            ImageKind::Result => write!(f, "result"),
        }
    }
}

/// Metadata persisted next to every stored image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredImageMeta {
    pub id: Uuid,
    pub kind: ImageKind,
    pub format: SupportedFormat,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
    pub created_at: DateTime<Utc>,
}

impl StoredImageMeta {
    pub fn is_expired(&self, retention: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(retention) {
            Ok(retention) => self
                .created_at
                .checked_add_signed(retention)
                .map_or(false, |deadline| deadline <= now),
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredImage {
    pub meta: StoredImageMeta,
    pub bytes: Vec<u8>,
}

/// Counts from one expiry sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub records_removed: usize,
    pub scratch_removed: usize,
}

pub struct ImageStore {
    images_dir: PathBuf,
    scratch_dir: PathBuf,
    retention: Duration,
}

impl ImageStore {
    /// Open (creating if needed) the store rooted at `config.root`
    pub async fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let images_dir = config.root.join("images");
        let scratch_dir = config.root.join("scratch");
        fs::create_dir_all(&images_dir).await?;
        fs::create_dir_all(&scratch_dir).await?;

        info!(
            "Image store opened at {:?} (retention {}h)",
            config.root,
            config.retention.as_secs() / 3600
        );

        Ok(Self {
            images_dir,
            scratch_dir,
            retention: config.retention,
        })
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    fn meta_path(&self, id: &Uuid) -> PathBuf {
        self.images_dir.join(format!("{}.json", id))
    }

    fn data_path(&self, id: &Uuid, format: SupportedFormat) -> PathBuf {
        self.images_dir
            .join(format!("{}.{}", id, format.extension()))
    }

    /// Persist a new image record under a fresh id
    pub async fn save(
        &self,
        kind: ImageKind,
        bytes: &[u8],
        info: &ImageInfo,
    ) -> Result<StoredImageMeta, StorageError> {
        let meta = StoredImageMeta {
            id: Uuid::new_v4(),
            kind,
            format: info.format,
            width: info.width,
            height: info.height,
            size_bytes: bytes.len(),
            created_at: Utc::now(),
        };

        write_atomic(&self.data_path(&meta.id, meta.format), bytes).await?;
        let json = serde_json::to_vec_pretty(&meta).map_err(|e| StorageError::Metadata {
            id: meta.id.to_string(),
            source: e,
        })?;
        write_atomic(&self.meta_path(&meta.id), &json).await?;

        debug!(
            "Stored {} image {} ({} bytes, {})",
            kind,
            meta.id,
            bytes.len(),
            meta.format.extension()
        );
        Ok(meta)
    }

    /// Look up a record's metadata. Unknown, malformed, expired and
    /// wrong-kind ids are all reported as `NotFound`.
    pub async fn metadata(&self, kind: ImageKind, id: &str) -> Result<StoredImageMeta, StorageError> {
        let not_found = || StorageError::NotFound {
            kind,
            id: id.to_string(),
        };

        let uuid = Uuid::parse_str(id.trim()).map_err(|_| not_found())?;
        let json = match fs::read(self.meta_path(&uuid)).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };
        let meta: StoredImageMeta =
            serde_json::from_slice(&json).map_err(|e| StorageError::Metadata {
                id: uuid.to_string(),
                source: e,
            })?;

        if meta.kind != kind {
            return Err(not_found());
        }
        if meta.is_expired(self.retention, Utc::now()) {
            debug!("{} image {} has expired", kind, uuid);
            self.delete_record(&meta).await;
            return Err(not_found());
        }
        Ok(meta)
    }

    /// Load a record with its bytes
    pub async fn load(&self, kind: ImageKind, id: &str) -> Result<StoredImage, StorageError> {
        let meta = self.metadata(kind, id).await?;
        let bytes = match fs::read(self.data_path(&meta.id, meta.format)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Metadata for {} image {} has no data file", kind, meta.id);
                return Err(StorageError::NotFound {
                    kind,
                    id: id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        Ok(StoredImage { meta, bytes })
    }

    /// Create a scratch file that is deleted when the handle drops
    pub fn scratch_file(&self, prefix: &str, suffix: &str) -> Result<NamedTempFile, StorageError> {
        Ok(tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(&self.scratch_dir)?)
    }

    async fn delete_record(&self, meta: &StoredImageMeta) {
        for path in [self.meta_path(&meta.id), self.data_path(&meta.id, meta.format)] {
            if let Err(e) = fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to delete {:?}: {}", path, e);
                }
            }
        }
    }

    /// Delete expired records and scratch files left behind by a crash
    pub async fn purge_expired(&self) -> Result<SweepStats, StorageError> {
        let now = Utc::now();
        let mut stats = SweepStats::default();

        let mut entries = fs::read_dir(&self.images_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let meta: StoredImageMeta = match fs::read(&path)
                .await
                .map_err(StorageError::from)
                .and_then(|json| {
                    serde_json::from_slice(&json).map_err(|e| StorageError::Metadata {
                        id: path.display().to_string(),
                        source: e,
                    })
                }) {
                Ok(meta) => meta,
                Err(e) => {
                    warn!("Skipping unreadable record {:?}: {}", path, e);
                    continue;
                }
            };
            if meta.is_expired(self.retention, now) {
                self.delete_record(&meta).await;
                stats.records_removed += 1;
            }
        }

        let mut scratch = fs::read_dir(&self.scratch_dir).await?;
        while let Some(entry) = scratch.next_entry().await? {
            let modified = entry.metadata().await.and_then(|m| m.modified());
            let stale = match modified {
                Ok(modified) => modified.elapsed().map_or(false, |age| age >= self.retention),
                Err(_) => false,
            };
            if stale && fs::remove_file(entry.path()).await.is_ok() {
                stats.scratch_removed += 1;
            }
        }

        if stats.records_removed > 0 || stats.scratch_removed > 0 {
            info!(
                "Expiry sweep removed {} records and {} scratch files",
                stats.records_removed, stats.scratch_removed
            );
        }
        Ok(stats)
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}
