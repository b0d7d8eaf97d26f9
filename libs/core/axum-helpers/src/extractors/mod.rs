//! Custom extractors for Axum handlers.
//!
//! Both reject with [`crate::errors::AppError`] so clients always receive
//! the standard error body.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
