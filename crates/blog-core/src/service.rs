//! Post service - the create/list/get/update/delete flow shared by every entry point.
//!
//! Each operation validates its input, talks to the [`ImageStore`] and the
//! [`PostRepository`] in sequence, and cleans up superseded images on a
//! best-effort basis.

use std::sync::Arc;

use crate::domain::{CreatePost, EditPost, NewPost, Post, PostChanges, PostId};
use crate::error::DomainError;
use crate::ports::{ImageStore, PostRepository};

/// Message reported when required fields are missing.
pub const MISSING_FIELDS: &str = "Faltan datos obligatorios";

/// Whether create requires an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImagePolicy {
    /// `titulo`, `contenido` and `imagen` are all mandatory.
    #[default]
    Required,
    /// Only `titulo` and `contenido` are mandatory.
    Optional,
}

/// Orchestrates the post repository and the image store.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    images: Arc<dyn ImageStore>,
    image_policy: ImagePolicy,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        images: Arc<dyn ImageStore>,
        image_policy: ImagePolicy,
    ) -> Self {
        Self {
            posts,
            images,
            image_policy,
        }
    }

    pub fn image_policy(&self) -> ImagePolicy {
        self.image_policy
    }

    pub fn images(&self) -> &Arc<dyn ImageStore> {
        &self.images
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_all().await?)
    }

    /// A single post, or `NotFound`.
    pub async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    /// Validate, store the upload (if any) and insert the row.
    pub async fn create(&self, input: CreatePost) -> Result<Post, DomainError> {
        let (Some(titulo), Some(contenido)) = (
            non_empty(input.titulo),
            non_empty(input.contenido),
        ) else {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()));
        };
        if self.image_policy == ImagePolicy::Required && input.imagen.is_none() {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()));
        }

        let imagen = match input.imagen {
            Some(upload) => Some(self.images.store(upload).await?),
            None => None,
        };

        let post = self
            .posts
            .insert(NewPost {
                titulo,
                contenido,
                imagen,
            })
            .await?;

        tracing::info!(post_id = post.id, imagen = ?post.imagen, "Post created");
        Ok(post)
    }

    /// Delete the row, then best-effort delete the image the caller named.
    pub async fn delete(&self, id: PostId, imagen: Option<&str>) -> Result<(), DomainError> {
        self.posts.delete_by_id(id).await?;

        if let Some(name) = imagen.filter(|n| !n.is_empty()) {
            self.images.discard(name).await;
        }

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    /// Replace titulo/contenido and, when a new upload is present, the image.
    ///
    /// Without an upload the caller-supplied `imagen_anterior` is written back.
    /// The previous image is discarded only after the row was updated.
    pub async fn update(&self, id: PostId, input: EditPost) -> Result<(), DomainError> {
        let (Some(titulo), Some(contenido)) = (input.titulo, input.contenido) else {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()));
        };
        let imagen_anterior = input.imagen_anterior.filter(|n| !n.is_empty());

        let new_image = match input.imagen {
            Some(upload) => Some(self.images.store(upload).await?),
            None => None,
        };
        let imagen = new_image.clone().or_else(|| imagen_anterior.clone());

        let affected = match self
            .posts
            .update(
                id,
                PostChanges {
                    titulo,
                    contenido,
                    imagen,
                },
            )
            .await
        {
            Ok(affected) => affected,
            Err(e) => {
                if let Some(name) = &new_image {
                    self.images.discard(name).await;
                }
                return Err(e.into());
            }
        };

        if affected == 0 {
            if let Some(name) = &new_image {
                self.images.discard(name).await;
            }
            return Err(DomainError::NotFound {
                entity_type: "Post",
                id,
            });
        }

        if let (Some(new), Some(old)) = (&new_image, &imagen_anterior) {
            if new != old {
                self.images.discard(old).await;
            }
        }

        tracing::info!(post_id = id, replaced_image = new_image.is_some(), "Post updated");
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
