//! Tagsmith Storage Library
//!
//! This crate provides the storage abstraction for uploaded and tagged audio
//! files, plus the local filesystem implementation.
//!
//! # Key format
//!
//! Files are addressed by `(StorageNamespace, file_id)`. Both namespaces store
//! `{file_id}.mp3`; the processed copy of upload `{id}` uses the identifier
//! `{id}_tagged`. Identifier generation and validation live in [`keys`] so all
//! backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use tagsmith_core::StorageNamespace;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
