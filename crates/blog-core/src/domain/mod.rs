//! Domain entities - the core business objects.

mod post;

pub use post::{CreatePost, EditPost, ImageUpload, NewPost, Post, PostChanges, PostId};
