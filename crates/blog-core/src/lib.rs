//! # Blog Core
//!
//! The domain layer of the blog backend.
//! This crate contains the post model, the ports infrastructure must implement,
//! and the [`PostService`](service::PostService) that every entry point drives.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
