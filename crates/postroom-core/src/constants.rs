//! Shared constants
//!
//! Defaults used by the pagination layer. Upload limits live in `Config`
//! because they are environment-tunable.

/// Default page size for list endpoints
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Upper bound on caller-controlled page sizes
pub const MAX_PER_PAGE: i64 = 100;
