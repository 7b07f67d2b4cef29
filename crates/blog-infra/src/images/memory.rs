//! In-memory image store - for ephemeral deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::ImageUpload;
use blog_core::error::ImageStoreError;
use blog_core::ports::{ImageStore, stored_image_name};

/// Keeps uploaded bytes in a HashMap keyed by stored name.
///
/// Note: Data is lost on process restart.
pub struct InMemoryImageStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Bytes of a stored image.
    pub async fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(name).cloned()
    }

    /// Number of stored images.
    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, ImageStoreError> {
        let mut files = self.files.write().await;

        let mut millis = Utc::now().timestamp_millis();
        let mut name = stored_image_name(millis, &upload.original_name);
        while files.contains_key(&name) {
            millis += 1;
            name = stored_image_name(millis, &upload.original_name);
        }

        files.insert(name.clone(), upload.bytes);
        Ok(name)
    }

    async fn remove(&self, name: &str) -> Result<(), ImageStoreError> {
        let mut files = self.files.write().await;
        files
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ImageStoreError::NotFound(name.to_string()))
    }

    async fn contains(&self, name: &str) -> bool {
        self.files.read().await.contains_key(name)
    }
}
