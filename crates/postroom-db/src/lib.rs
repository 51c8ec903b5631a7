//! Postroom Database Library
//!
//! This crate provides the sqlx/Postgres repositories for recipient and user
//! records.

pub mod db;

// Re-export commonly used types
pub use db::{RecipientRepository, UserRepository};
