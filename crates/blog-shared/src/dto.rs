//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as returned by `GET /posts` and `GET /post/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub titulo: String,
    pub contenido: String,
    pub imagen: Option<String>,
    pub fecha: DateTime<Utc>,
}

/// Query string of `DELETE /delete/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePostQuery {
    /// Stored image name to clean up along with the post.
    pub imagen: Option<String>,
}
