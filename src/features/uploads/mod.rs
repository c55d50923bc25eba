//! Read-only static file serving.
//!
//! Uploaded images are served from the uploads directory under `/uploads`,
//! matching the `imageUrl` values stored on entries. When a frontend bundle
//! directory is configured, unmatched paths fall through to it.

pub mod routes;

pub use routes::{frontend_fallback, routes};
