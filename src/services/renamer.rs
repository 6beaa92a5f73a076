//! Video rename pipeline
//!
//! Walks the library tree, replaces human-readable video filenames with
//! opaque identifiers, and records every rename in the video registry.
//! Also provides the reverse operation (restore) and the reconciliation
//! sweep that drops registry rows whose file has disappeared.
//!
//! Batch operations never fail atomically: a file that cannot be processed
//! is logged and skipped so one bad file does not block the rest.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::file_utils::{is_already_renamed, is_video_file};
use super::identity::generate_unique_id;
use crate::db::Database;

/// One completed restore: where the file was and where it is now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoredFile {
    pub old_path: String,
    pub new_path: String,
}

/// Rename, restore, and reconciliation over the video registry
pub struct RenamerService {
    db: Database,
}

impl RenamerService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Rename every not-yet-processed video file under `root`, registering
    /// each one. Returns the newly assigned filenames. Files whose basename
    /// already follows the identifier convention are skipped, which makes
    /// repeated runs over an unchanged tree no-ops.
    pub async fn rename_tree(&self, root: &Path) -> Result<Vec<String>> {
        if !root.exists() {
            warn!(path = %root.display(), "Rename root does not exist");
            return Ok(Vec::new());
        }

        let mut renamed = Vec::new();

        // Sorted traversal keeps the processing order deterministic
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let filename = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if is_already_renamed(filename) || !is_video_file(path) {
                continue;
            }

            match self.rename_single(path).await {
                Ok(Some(new_name)) => renamed.push(new_name),
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to rename file, skipping");
                }
            }
        }

        info!(root = %root.display(), count = renamed.len(), "Rename pass complete");
        Ok(renamed)
    }

    /// Rename one video file in place and register it. Returns the new
    /// filename, or None if the file is not a rename candidate (missing,
    /// not a video, or already processed). The physical move happens before
    /// the registry insert so a failed move leaves no orphaned record.
    pub async fn rename_single(&self, path: &Path) -> Result<Option<String>> {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => return Ok(None),
        };
        if !path.is_file() || !is_video_file(path) || is_already_renamed(&filename) {
            return Ok(None);
        }

        let directory = path.parent().context("file has no parent directory")?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .context("file has no extension")?;

        let (id, new_path) = generate_unique_id(directory, &extension)?;
        std::fs::rename(path, &new_path)
            .with_context(|| format!("moving {} to {}", path.display(), new_path.display()))?;

        let new_name = new_path
            .file_name()
            .and_then(|n| n.to_str())
            .context("generated path has no filename")?
            .to_string();

        self.db
            .videos()
            .insert(&id, &filename, &new_name, &new_path.to_string_lossy())
            .await?;

        debug!(id = %id, original = %filename, "Registered renamed video");
        Ok(Some(new_name))
    }

    /// Restore every registered file to its original human-readable name.
    /// Missing files and already-restored files are skipped; an occupied
    /// target name is never overwritten. When `update_registry` is false the
    /// registry keeps the stale mapping so the files can be re-renamed later.
    pub async fn restore_all(&self, update_registry: bool) -> Result<Vec<RestoredFile>> {
        let videos = self.db.videos();
        let mut restored = Vec::new();

        for record in videos.get_all().await? {
            let current = Path::new(&record.path);
            if !current.exists() {
                debug!(path = %record.path, "File missing, nothing to restore");
                continue;
            }

            let basename = current.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if basename == record.original_name {
                continue;
            }

            let target = current
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(&record.original_name);
            if target.exists() {
                warn!(
                    id = %record.id,
                    target = %target.display(),
                    "Restore target already occupied, skipping"
                );
                continue;
            }

            if let Err(e) = std::fs::rename(current, &target) {
                warn!(path = %record.path, error = %e, "Failed to restore file, skipping");
                continue;
            }

            if update_registry {
                if let Err(e) = videos
                    .update(&record.id, &record.original_name, &target.to_string_lossy())
                    .await
                {
                    warn!(id = %record.id, error = %e, "Restored on disk but registry update failed");
                }
            }

            restored.push(RestoredFile {
                old_path: record.path.clone(),
                new_path: target.to_string_lossy().into_owned(),
            });
        }

        info!(count = restored.len(), update_registry, "Restore pass complete");
        Ok(restored)
    }

    /// Drop every registry row whose backing file no longer exists and
    /// return the removed paths. Keeps the registry trustworthy after
    /// files are deleted outside this process.
    pub async fn purge_missing(&self) -> Result<Vec<String>> {
        let videos = self.db.videos();
        let mut removed = Vec::new();

        for record in videos.get_all().await? {
            if Path::new(&record.path).exists() {
                continue;
            }
            match videos.delete_by_id(&record.id).await {
                Ok(true) => removed.push(record.path),
                Ok(false) => {}
                Err(e) => {
                    warn!(id = %record.id, error = %e, "Failed to purge registry row, skipping");
                }
            }
        }

        if !removed.is_empty() {
            info!(count = removed.len(), "Purged registry rows for missing files");
        }
        Ok(removed)
    }
}
