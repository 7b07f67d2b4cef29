//! Image store port - abstraction over where uploaded images live.

use async_trait::async_trait;

use crate::domain::ImageUpload;
use crate::error::ImageStoreError;

/// Image store trait - abstraction over image backends (filesystem, in-memory).
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist an upload under a freshly generated name and return that name.
    async fn store(&self, upload: ImageUpload) -> Result<String, ImageStoreError>;

    /// Remove a stored image.
    async fn remove(&self, name: &str) -> Result<(), ImageStoreError>;

    /// Check whether an image is currently stored.
    async fn contains(&self, name: &str) -> bool;

    /// Best-effort removal: failures are logged and swallowed.
    async fn discard(&self, name: &str) {
        if let Err(e) = self.remove(name).await {
            tracing::warn!(image = %name, error = %e, "Failed to delete image");
        }
    }
}

/// Build the stored name for an upload: `<unix-millis>-<file name>`.
///
/// Only the last path component of the client-supplied name is kept.
pub fn stored_image_name(millis: i64, original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let base = if base.is_empty() || base == "." || base == ".." {
        "imagen"
    } else {
        base
    };
    format!("{millis}-{base}")
}

/// Whether a caller-supplied name can address a stored image.
///
/// Names are single path components; `..` inside a name such as `foto..png` is fine.
pub fn is_safe_image_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}
