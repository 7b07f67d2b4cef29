use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary key of a post. Assigned by the repository on insert.
pub type PostId = i32;

/// Post entity - a blog entry with an optional image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub titulo: String,
    pub contenido: String,
    /// Stored name of the image in the image store, if any.
    pub imagen: Option<String>,
    pub fecha: DateTime<Utc>,
}

/// Row payload for inserting a post. `fecha` is assigned at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub titulo: String,
    pub contenido: String,
    pub imagen: Option<String>,
}

/// Row payload for updating a post in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub titulo: String,
    pub contenido: String,
    pub imagen: Option<String>,
}

/// A single uploaded file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(original_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Input of the create operation. Text fields are `None` when the client omitted them.
#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub titulo: Option<String>,
    pub contenido: Option<String>,
    pub imagen: Option<ImageUpload>,
}

/// Input of the update operation.
#[derive(Debug, Clone, Default)]
pub struct EditPost {
    pub titulo: Option<String>,
    pub contenido: Option<String>,
    /// Image the client believes the post currently references.
    pub imagen_anterior: Option<String>,
    /// Replacement upload, if the client sent one.
    pub imagen: Option<ImageUpload>,
}
