//! Common utilities for handlers.

pub mod upload;
