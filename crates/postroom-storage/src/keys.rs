//! Shared key generation for storage backends.
//!
//! Key format: `files/{epoch_seconds}_{random_token}.{extension}`.

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a storage key for a recipient document.
///
/// The combination of the current epoch second and a 64-bit random token
/// keeps keys collision-free even when multiple uploads land in the same
/// second. The extension is stored lowercase.
pub fn document_key(extension: &str) -> String {
    let epoch_seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut rng = rand::rng();
    let token: [u8; 8] = rng.random();

    format!(
        "files/{}_{}.{}",
        epoch_seconds,
        hex::encode(token),
        extension.to_lowercase()
    )
}
