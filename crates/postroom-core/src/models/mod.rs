//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod pagination;
mod recipient;
mod user;

// Re-export all models for convenient imports
pub use pagination::*;
pub use recipient::*;
pub use user::*;
