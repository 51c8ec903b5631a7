//! Database repositories for data access layer
//!
//! This module contains all repository implementations for database operations.
//! Each repository is responsible for a specific domain entity and provides
//! CRUD operations and specialized queries.

pub mod recipient;
pub mod user;

pub use recipient::RecipientRepository;
pub use user::UserRepository;
