//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod image_store;
mod repository;

pub use image_store::{ImageStore, is_safe_image_name, stored_image_name};
pub use repository::PostRepository;
