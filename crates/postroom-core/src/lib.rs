//! Postroom Core Library
//!
//! This crate provides core domain models, error types, configuration, and validation
//! that are shared across all Postroom components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, PostroomConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::*;
