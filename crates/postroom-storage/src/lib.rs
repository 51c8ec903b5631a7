//! Postroom Storage Library
//!
//! This crate provides the storage abstraction and the local filesystem
//! implementation used for recipient documents.
//!
//! # Storage key format
//!
//! Recipient documents live under the `files/` content area:
//! `files/{epoch_seconds}_{random_token}.{extension}`. Keys must not contain
//! `..` or a leading `/`. Key generation is centralized in the `keys` module
//! so every caller produces the same layout.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::document_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
