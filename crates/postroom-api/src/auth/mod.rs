//! Bearer access-key authentication.

pub mod access_key;
pub mod middleware;
pub mod models;
