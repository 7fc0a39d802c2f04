// src/export/store.rs
//! Export persistence.
//!
//! Exports are insert-only; the only other write is deletion by the owner.

use super::types::Export;
use crate::error::AppError;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait ExportStore: Send + Sync {
    async fn insert(&self, export: &Export) -> Result<(), AppError>;

    async fn get(&self, id: &Uuid) -> Result<Export, AppError>;

    /// An export owned by `user_id`. Someone else's export is reported as
    /// not found.
    async fn get_for_user(&self, user_id: &UserId, id: &Uuid) -> Result<Export, AppError> {
        let export = self.get(id).await?;
        if &export.user_id != user_id {
            return Err(AppError::ExportNotFound(id.to_string()));
        }
        Ok(export)
    }

    /// The user's exports, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Export>, AppError>;

    /// Exports the user created at or after `since`.
    async fn count_since(&self, user_id: &UserId, since: DateTime<Utc>) -> Result<u32, AppError>;

    /// Removes an export owned by `user_id`. Someone else's export is
    /// reported as not found.
    async fn delete(&self, user_id: &UserId, id: &Uuid) -> Result<(), AppError>;
}

fn newest_first(mut exports: Vec<Export>) -> Vec<Export> {
    exports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    exports
}

fn count_recent<'a>(
    exports: impl Iterator<Item = &'a Export>,
    user_id: &UserId,
    since: DateTime<Utc>,
) -> u32 {
    let count = exports
        .filter(|e| &e.user_id == user_id && e.created_at >= since)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// One pretty-printed JSON file per export, named `{id}.json`.
pub struct FileExportStore {
    dir: PathBuf,
}

impl FileExportStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("create store directory", &dir, e))?;
        log::debug!("Export store at {}", dir.display());
        Ok(Self { dir })
    }

    /// `$XDG_DATA_HOME/notion2blog/exports` or `~/.local/share/notion2blog/exports`.
    pub fn default_dir() -> PathBuf {
        std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".local").join("share")
            })
            .join("notion2blog")
            .join("exports")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read_export(&self, path: &Path) -> Result<Export, AppError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| storage_error("read", path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Storage(format!("corrupt export {}: {}", path.display(), e)))
    }

    /// Every readable export in the directory. Unreadable files are logged
    /// and skipped so one bad file does not hide the rest.
    async fn read_all(&self) -> Result<Vec<Export>, AppError> {
        let mut dir = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| storage_error("list", &self.dir, e))?;

        let mut exports = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| storage_error("list", &self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_export(&path).await {
                Ok(export) => exports.push(export),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(exports)
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> AppError {
    AppError::Storage(format!("failed to {} {}: {}", action, path.display(), err))
}

#[async_trait::async_trait]
impl ExportStore for FileExportStore {
    async fn insert(&self, export: &Export) -> Result<(), AppError> {
        let path = self.path_for(&export.id);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(AppError::Storage(format!("export {} already exists", export.id)));
        }

        let json = serde_json::to_string_pretty(export)
            .map_err(|e| AppError::Storage(format!("failed to encode export: {}", e)))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| storage_error("write", &path, e))?;
        log::debug!("Stored export {} at {}", export.id, path.display());
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Export, AppError> {
        let path = self.path_for(id);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(AppError::ExportNotFound(id.to_string()));
        }
        self.read_export(&path).await
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Export>, AppError> {
        let exports = self
            .read_all()
            .await?
            .into_iter()
            .filter(|e| &e.user_id == user_id)
            .collect();
        Ok(newest_first(exports))
    }

    async fn count_since(&self, user_id: &UserId, since: DateTime<Utc>) -> Result<u32, AppError> {
        let exports = self.read_all().await?;
        Ok(count_recent(exports.iter(), user_id, since))
    }

    async fn delete(&self, user_id: &UserId, id: &Uuid) -> Result<(), AppError> {
        self.get_for_user(user_id, id).await?;
        let path = self.path_for(id);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| storage_error("delete", &path, e))
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Process-local store, used by tests and one-shot runs.
#[derive(Default)]
pub struct MemoryExportStore {
    exports: RwLock<Vec<Export>>,
}

impl MemoryExportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.exports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.read().is_empty()
    }
}

#[async_trait::async_trait]
impl ExportStore for MemoryExportStore {
    async fn insert(&self, export: &Export) -> Result<(), AppError> {
        let mut exports = self.exports.write();
        if exports.iter().any(|e| e.id == export.id) {
            return Err(AppError::Storage(format!("export {} already exists", export.id)));
        }
        exports.push(export.clone());
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Export, AppError> {
        self.exports
            .read()
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| AppError::ExportNotFound(id.to_string()))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Export>, AppError> {
        let exports = self
            .exports
            .read()
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(exports))
    }

    async fn count_since(&self, user_id: &UserId, since: DateTime<Utc>) -> Result<u32, AppError> {
        Ok(count_recent(self.exports.read().iter(), user_id, since))
    }

    async fn delete(&self, user_id: &UserId, id: &Uuid) -> Result<(), AppError> {
        let mut exports = self.exports.write();
        let before = exports.len();
        exports.retain(|e| !(&e.id == id && &e.user_id == user_id));
        if exports.len() == before {
            return Err(AppError::ExportNotFound(id.to_string()));
        }
        Ok(())
    }
}
