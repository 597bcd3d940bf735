//! Tagsmith Core Library
//!
//! This crate provides the configuration, error taxonomy and shared models
//! used by the storage, tag and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{CleanupResponse, CoverArt, SaveTagsResponse, TagFields, TagUpdate, UploadResponse};
pub use storage_types::StorageNamespace;
