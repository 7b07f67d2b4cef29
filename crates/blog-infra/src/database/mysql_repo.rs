//! MySQL post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set, SqlErr,
};

use blog_core::domain::{NewPost, Post, PostChanges, PostId};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// MySQL-backed post repository over a pooled connection.
pub struct MySqlPostRepository {
    pub(crate) db: DbConn,
}

impl MySqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        return RepoError::Constraint(msg);
    }
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        _ => RepoError::Query(e.to_string()),
    }
}

#[async_trait]
impl PostRepository for MySqlPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::Fecha)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: NotSet,
            titulo: Set(new_post.titulo),
            contenido: Set(new_post.contenido),
            imagen: Set(new_post.imagen),
            fecha: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Inserted post row");
        Ok(model.into())
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<u64, RepoError> {
        // sqlx negotiates CLIENT_FOUND_ROWS, so rows_affected counts matched rows.
        let result = PostEntity::update_many()
            .col_expr(post::Column::Titulo, Expr::value(changes.titulo))
            .col_expr(post::Column::Contenido, Expr::value(changes.contenido))
            .col_expr(post::Column::Imagen, Expr::value(changes.imagen))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }

    async fn delete_by_id(&self, id: PostId) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            tracing::debug!(post_id = id, "Delete matched no rows");
        }

        Ok(())
    }
}
