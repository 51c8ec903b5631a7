//! API-wide constants.

/// Path prefix for all recipient routes (e.g. `/api/v0/recipients`).
pub const API_PREFIX: &str = "/api/v0";
