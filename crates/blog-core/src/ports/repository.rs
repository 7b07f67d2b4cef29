use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Post repository. Every method maps to a single statement against the `posts` table.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `fecha` first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Insert a post and return the stored row.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite titulo, contenido and imagen of a post.
    /// Returns the number of affected rows; `0` means no such id.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<u64, RepoError>;

    /// Delete a post. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: PostId) -> Result<(), RepoError>;
}
