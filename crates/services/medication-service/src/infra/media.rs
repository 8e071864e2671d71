//! Uploaded image storage on the local filesystem.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use common::{AppError, AppResult};

/// URL prefix under which the media directory is served.
pub const MEDIA_URL_PREFIX: &str = "media";

/// A file written to the media directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name inside the media directory, `<uuid>.<ext>`
    pub name: String,
    /// Relative URL, `media/<uuid>.<ext>`
    pub url: String,
}

/// Media directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` under a fresh name keeping `extension`.
    pub async fn save(&self, extension: &str, content: &[u8]) -> AppResult<StoredFile> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("Cannot create media directory: {}", e)))?;

        let name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(self.root.join(&name), content)
            .await
            .map_err(|e| AppError::internal(format!("Cannot write {}: {}", name, e)))?;

        tracing::debug!(file = %name, bytes = content.len(), "Media file stored");
        Ok(StoredFile {
            url: format!("{}/{}", MEDIA_URL_PREFIX, name),
            name,
        })
    }

    /// Delete a stored file; a missing file is not an error.
    pub async fn remove(&self, name: &str) -> AppResult<()> {
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::internal(format!("Cannot remove {}: {}", name, e))),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }
}
