//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::error::ImageStoreError;
use blog_core::ports::{ImageStore, PostRepository};
use blog_core::service::ImagePolicy;
use blog_infra::images::{FsImageStore, InMemoryImageStore};
use blog_infra::InMemoryPostRepository;

#[cfg(feature = "mysql")]
use blog_infra::database::{DatabaseConnections, MySqlPostRepository};

use crate::config::{AppConfig, ImageStoreConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Backend serving the posts table, reported by the health check.
    pub storage: &'static str,
    /// Backend serving uploaded images.
    pub image_storage: &'static str,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, ImageStoreError> {
        let (posts, storage) = Self::post_repository(config).await;

        let (images, image_storage) = Self::image_store(&config.images).await?;

        tracing::info!(
            storage,
            image_storage,
            image_policy = ?config.image_policy,
            "Application state initialized"
        );

        Ok(Self {
            posts: PostService::new(posts, images, config.image_policy),
            storage,
            image_storage,
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    /// State over in-memory posts and images.
    #[cfg(test)]
    pub fn in_memory(image_policy: ImagePolicy, max_upload_bytes: usize) -> Self {
        Self {
            posts: PostService::new(
                Arc::new(InMemoryPostRepository::new()),
                Arc::new(InMemoryImageStore::new()),
                image_policy,
            ),
            storage: "memory",
            image_storage: "memory",
            max_upload_bytes,
        }
    }

    async fn image_store(
        config: &ImageStoreConfig,
    ) -> Result<(Arc<dyn ImageStore>, &'static str), ImageStoreError> {
        match config {
            ImageStoreConfig::Filesystem(dir) => {
                let store: Arc<dyn ImageStore> = Arc::new(FsImageStore::init(dir).await?);
                Ok((store, "fs"))
            }
            ImageStoreConfig::Memory => {
                tracing::warn!("IMAGE_STORE=memory - uploaded images are lost on restart");
                let store: Arc<dyn ImageStore> = Arc::new(InMemoryImageStore::new());
                Ok((store, "memory"))
            }
        }
    }

    #[cfg(feature = "mysql")]
    async fn post_repository(config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        let fallback: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());

        let Some(db_config) = &config.database else {
            tracing::warn!("No database configured. Running without database (in-memory mode).");
            return (fallback, "memory");
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                let repo: Arc<dyn PostRepository> =
                    Arc::new(MySqlPostRepository::new(connections.main));
                (repo, "mysql")
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (fallback, "memory")
            }
        }
    }

    #[cfg(not(feature = "mysql"))]
    async fn post_repository(_config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        tracing::info!("Running without mysql feature - using in-memory repository");
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        (repo, "memory")
    }
}
