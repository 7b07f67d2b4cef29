//! Filesystem image store - one flat directory of uploaded files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use blog_core::domain::ImageUpload;
use blog_core::error::ImageStoreError;
use blog_core::ports::{ImageStore, is_safe_image_name, stored_image_name};

/// Stores uploads as `{dir}/{millis}-{original name}`.
pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    /// Open the store, creating the directory if needed.
    pub async fn init(dir: impl Into<PathBuf>) -> Result<Self, ImageStoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| ImageStoreError::Io {
                name: dir.display().to_string(),
                source,
            })?;

        tracing::info!(dir = %dir.display(), "Image directory ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &str) -> Result<PathBuf, ImageStoreError> {
        if !is_safe_image_name(name) {
            return Err(ImageStoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, ImageStoreError> {
        let mut millis = Utc::now().timestamp_millis();

        // create_new guarantees a fresh name; on collision bump the prefix.
        let (name, path, mut file) = loop {
            let name = stored_image_name(millis, &upload.original_name);
            let path = self.dir.join(&name);
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => break (name, path, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => millis += 1,
                Err(source) => return Err(ImageStoreError::Io { name, source }),
            }
        };

        let written = async {
            file.write_all(&upload.bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(source) = written {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!(image = %name, error = %e, "Failed to remove partial upload");
            }
            return Err(ImageStoreError::Io { name, source });
        }

        tracing::debug!(image = %name, bytes = upload.bytes.len(), "Stored image");
        Ok(name)
    }

    async fn remove(&self, name: &str) -> Result<(), ImageStoreError> {
        let path = self.path_of(name)?;
        tokio::fs::remove_file(&path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ImageStoreError::NotFound(name.to_string())
            } else {
                ImageStoreError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })?;

        tracing::debug!(image = %name, "Removed image");
        Ok(())
    }

    async fn contains(&self, name: &str) -> bool {
        match self.path_of(name) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (tempfile::TempDir, FsImageStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsImageStore::init(tmp.path().join("imagenes")).await.unwrap();
        (tmp, store)
    }

    #[tokio::test]
    async fn test_store_writes_bytes_under_generated_name() {
        let (_tmp, store) = temp_store().await;

        let name = store
            .store(ImageUpload::new("a.png", b"fake png".to_vec()))
            .await
            .unwrap();

        assert!(name.ends_with("-a.png"));
        let on_disk = tokio::fs::read(store.dir().join(&name)).await.unwrap();
        assert_eq!(on_disk, b"fake png");
        assert!(store.contains(&name).await);
    }

    #[tokio::test]
    async fn test_same_original_name_never_collides() {
        let (_tmp, store) = temp_store().await;

        let mut names = Vec::new();
        for _ in 0..5 {
            names.push(
                store
                    .store(ImageUpload::new("a.png", b"x".to_vec()))
                    .await
                    .unwrap(),
            );
        }
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn test_remove_and_missing_file() {
        let (_tmp, store) = temp_store().await;
        let name = store
            .store(ImageUpload::new("a.png", b"x".to_vec()))
            .await
            .unwrap();

        store.remove(&name).await.unwrap();
        assert!(!store.contains(&name).await);
        assert!(matches!(
            store.remove(&name).await,
            Err(ImageStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_name_with_double_dot() {
        let (_tmp, store) = temp_store().await;
        let name = store
            .store(ImageUpload::new("a..png", b"x".to_vec()))
            .await
            .unwrap();

        assert!(name.ends_with("-a..png"));
        store.remove(&name).await.unwrap();
        assert!(!store.contains(&name).await);
        assert!(!store.dir().join(&name).exists());
    }

    #[tokio::test]
    async fn test_remove_rejects_path_traversal() {
        let (tmp, store) = temp_store().await;
        tokio::fs::write(tmp.path().join("keep.txt"), b"keep")
            .await
            .unwrap();

        assert!(matches!(
            store.remove("../keep.txt").await,
            Err(ImageStoreError::InvalidName(_))
        ));
        assert!(tmp.path().join("keep.txt").exists());
    }

    #[tokio::test]
    async fn test_discard_swallows_errors() {
        let (_tmp, store) = temp_store().await;
        store.discard("does-not-exist.png").await;
        store.discard("../escape.png").await;
    }
}
