//! Observability module - request IDs on top of `tracing-actix-web` spans.

mod request_id;

pub use request_id::RequestIdMiddleware;
