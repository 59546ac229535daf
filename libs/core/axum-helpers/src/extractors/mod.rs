//! Custom extractors for Axum handlers.
//!
//! Each extractor rejects with the standard error envelope instead of
//! Axum's plain-text rejections.

pub mod json_body;
pub mod query_params;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
pub use uuid_path::UuidPath;
