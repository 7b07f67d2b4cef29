//! # Blog Shared
//!
//! Wire types exchanged between the blog frontend and the API server.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
