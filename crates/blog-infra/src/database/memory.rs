//! In-memory post repository - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostChanges, PostId};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

struct Table {
    rows: Vec<Post>,
    next_id: PostId,
}

/// In-memory post table behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start with existing rows; new ids continue after the highest seeded id.
    pub fn seeded(rows: Vec<Post>) -> Self {
        let next_id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            table: RwLock::new(Table { rows, next_id }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| b.fecha.cmp(&a.fecha).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        let post = Post {
            id: table.next_id,
            titulo: new_post.titulo,
            contenido: new_post.contenido,
            imagen: new_post.imagen,
            fecha: Utc::now(),
        };
        table.next_id += 1;
        table.rows.push(post.clone());

        Ok(post)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<u64, RepoError> {
        let mut table = self.table.write().await;

        match table.rows.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.titulo = changes.titulo;
                post.contenido = changes.contenido;
                post.imagen = changes.imagen;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: PostId) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.retain(|p| p.id != id);
        Ok(())
    }
}
